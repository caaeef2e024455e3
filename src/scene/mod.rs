pub mod triangle_mesh;

use crate::geometry::WorldBox;

pub use triangle_mesh::{MeshError, ObjOpenError, TriangleIdx, TriangleMesh, VertexIdx};

/// Reference to a (possibly clipped) triangle, together with its bounds.
/// Fragments produced by spatial splits share the triangle index with the original reference
/// and have narrower bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrimRef {
    pub bounds: WorldBox,
    pub triangle: TriangleIdx,
}

impl PrimRef {
    pub fn new(bounds: WorldBox, triangle: TriangleIdx) -> PrimRef {
        PrimRef { bounds, triangle }
    }

    /// Same primitive, different bounds.
    pub fn with_bounds(&self, bounds: WorldBox) -> PrimRef {
        PrimRef {
            bounds,
            triangle: self.triangle,
        }
    }
}

/// Summary of a range of primitive references.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrimInfo {
    pub count: usize,
    pub geometry_bounds: WorldBox,
}

impl PrimInfo {
    pub fn from_prims(prims: &[PrimRef]) -> PrimInfo {
        prims.iter().fold(PrimInfo::default(), |mut info, prim| {
            info.count += 1;
            info.geometry_bounds.extend(&prim.bounds);
            info
        })
    }

    pub fn merge(&self, other: &PrimInfo) -> PrimInfo {
        PrimInfo {
            count: self.count + other.count,
            geometry_bounds: self.geometry_bounds.union(&other.geometry_bounds),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for PrimInfo {
    fn default() -> Self {
        PrimInfo {
            count: 0,
            geometry_bounds: WorldBox::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WorldPoint;
    use assert2::assert;

    fn prim(min: [f32; 3], max: [f32; 3], index: usize) -> PrimRef {
        PrimRef::new(WorldBox::new(min.into(), max.into()), index.into())
    }

    #[test]
    fn prim_info_empty() {
        let info = PrimInfo::from_prims(&[]);
        assert!(info.is_empty());
        assert!(info.geometry_bounds.is_empty());
    }

    #[test]
    fn prim_info_bounds() {
        let prims = [
            prim([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 0),
            prim([-1.0, 0.5, 0.0], [0.0, 3.0, 0.5], 1),
        ];
        let info = PrimInfo::from_prims(&prims);
        assert!(info.count == 2);
        assert!(info.geometry_bounds.min == WorldPoint::new(-1.0, 0.0, 0.0));
        assert!(info.geometry_bounds.max == WorldPoint::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn merge_stats() {
        let prims = [
            prim([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 0),
            prim([-1.0, 0.5, 0.0], [0.0, 3.0, 0.5], 1),
            prim([2.0, 2.0, 2.0], [2.0, 2.0, 2.0], 2),
        ];
        let merged = PrimInfo::from_prims(&prims[..1]).merge(&PrimInfo::from_prims(&prims[1..]));
        assert!(merged == PrimInfo::from_prims(&prims));
    }

    #[test]
    fn merge_with_default() {
        let info = PrimInfo::from_prims(&[prim([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 0)]);
        assert!(PrimInfo::default().merge(&info) == info);
    }

    #[test]
    fn with_bounds_keeps_triangle() {
        let p = prim([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 7);
        let narrower = p.with_bounds(WorldBox::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(0.5, 1.0, 1.0),
        ));
        assert!(narrower.triangle == p.triangle);
        assert!(narrower.bounds.max.x == 0.5);
    }
}
