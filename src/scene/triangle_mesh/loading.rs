use std::{fs, path::Path};

use indexmap::IndexMap;
use thiserror::Error;

use crate::geometry::{Triangle, WorldPoint};

use super::{MeshError, TriangleMesh};

impl TriangleMesh {
    pub fn with_obj(p: impl AsRef<Path>) -> Result<TriangleMesh, ObjOpenError> {
        let content = fs::read_to_string(p)?;
        let parsed = wavefront_obj::obj::parse(content)?;

        let (vertices, triangles) = Self::load_obj(parsed);

        Ok(Self::new(vertices, triangles)?)
    }

    fn load_obj(obj: wavefront_obj::obj::ObjSet) -> (Vec<WorldPoint>, Vec<Triangle<usize>>) {
        let mut triangles = Vec::new();
        // Keyed by (object index, vertex index within the object)
        let mut vertices = IndexMap::new();
        let mut skipped = 0usize;

        for (object_index, o) in obj.objects.into_iter().enumerate() {
            for geometry in o.geometry {
                for shape in geometry.shapes {
                    let wavefront_obj::obj::Primitive::Triangle(a, b, c) = shape.primitive else {
                        skipped += 1;
                        continue;
                    };

                    let mut handle_vertex = |vtindex: (usize, Option<usize>, Option<usize>)| {
                        let entry = vertices.entry((object_index, vtindex.0));
                        let index = entry.index();
                        entry.or_insert_with(|| {
                            let vertex = &o.vertices[vtindex.0];
                            WorldPoint::new(vertex.x as f32, vertex.y as f32, vertex.z as f32)
                        });
                        index
                    };

                    let a = handle_vertex(a);
                    let b = handle_vertex(b);
                    let c = handle_vertex(c);

                    triangles.push(Triangle::new(a, b, c));
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "Ignoring non-triangle primitives");
        }
        tracing::debug!(
            vertices = vertices.len(),
            triangles = triangles.len(),
            "Loaded OBJ"
        );

        (vertices.into_values().collect(), triangles)
    }
}

#[derive(Debug, Error)]
pub enum ObjOpenError {
    #[error("Failed to read file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse file: {0}")]
    ParseError(#[from] wavefront_obj::ParseError),

    #[error("Invalid mesh: {0}")]
    MeshError(#[from] MeshError),
}
