mod loading;

use index_vec::IndexVec;
use thiserror::Error;

use crate::{
    geometry::{Axis, FloatType, Triangle, WorldBox, WorldPoint, clip_triangle},
    scene::PrimRef,
    spatial_split::Clipper,
};

pub use loading::ObjOpenError;

/// Indexed triangle geometry.
/// Only read by the split machinery, never modified after construction.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    vertices: IndexVec<VertexIdx, WorldPoint>,
    triangles: IndexVec<TriangleIdx, Triangle<VertexIdx>>,
}

impl TriangleMesh {
    pub fn new(
        vertices: Vec<WorldPoint>,
        triangles: Vec<Triangle<usize>>,
    ) -> Result<TriangleMesh, MeshError> {
        if let Some(index) = vertices
            .iter()
            .position(|v| v.iter().any(|x| !x.is_finite()))
        {
            return Err(MeshError::NonFiniteVertex { index });
        }

        let vertex_count = vertices.len();
        for (triangle, t) in triangles.iter().enumerate() {
            if let Some(vertex) = t.iter().copied().find(|i| *i >= vertex_count) {
                return Err(MeshError::VertexIndexOutOfRange {
                    triangle,
                    vertex,
                    vertex_count,
                });
            }
        }

        Ok(TriangleMesh {
            vertices: IndexVec::from_vec(vertices),
            triangles: triangles
                .iter()
                .map(|t| t.map(|i| VertexIdx::from_usize(*i)))
                .collect(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Resolves vertex positions of a triangle
    pub fn triangle(&self, index: TriangleIdx) -> Triangle<WorldPoint> {
        self.triangles[index].map(|i| self.vertices[*i])
    }

    pub fn bounding_box(&self) -> Option<WorldBox> {
        WorldBox::from_points(self.vertices.iter())
    }

    /// Creates one primitive reference for each triangle in the mesh.
    pub fn prim_refs(&self) -> Vec<PrimRef> {
        self.triangles
            .indices()
            .map(|index| PrimRef::new(self.triangle(index).bounds(), index))
            .collect()
    }
}

impl Clipper for TriangleMesh {
    type Geometry = Triangle<WorldPoint>;

    fn geometry(&self, primitive: &PrimRef) -> Triangle<WorldPoint> {
        self.triangle(primitive.triangle)
    }

    fn clip(
        &self,
        geometry: &Triangle<WorldPoint>,
        fragment: &PrimRef,
        axis: Axis,
        position: FloatType,
    ) -> (PrimRef, PrimRef) {
        let (left, right) = clip_triangle(geometry, &fragment.bounds, axis, position);
        (fragment.with_bounds(left), fragment.with_bounds(right))
    }
}

#[derive(Debug, Error)]
pub enum MeshError {
    #[error(
        "Triangle {triangle} references vertex {vertex}, but the mesh has only {vertex_count} vertices"
    )]
    VertexIndexOutOfRange {
        triangle: usize,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("Vertex {index} has non-finite coordinates")]
    NonFiniteVertex { index: usize },
}

index_vec::define_index_type! {
    pub struct TriangleIdx = usize;
}

index_vec::define_index_type! {
    pub struct VertexIdx = usize;
}
