use nalgebra::Vector3;

use crate::geometry::{Axis, FloatType, WorldBox, WorldPoint, WorldVector};

pub type BinIndices = Vector3<usize>;

/// Linear mapping of world coordinates to bin indices along each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BinMapping<const BINS: usize> {
    offset: WorldVector,
    /// Zero for axes where the geometry has no usable extent
    scale: WorldVector,
}

impl<const BINS: usize> BinMapping<BINS> {
    /// Computes the mapping for geometry with the given bounds.
    pub fn new(geometry_bounds: &WorldBox) -> Self {
        let lower = geometry_bounds.min.coords;
        let upper = geometry_bounds.max.coords;
        let scale = lower.zip_map(&upper, |lower, upper| {
            let extent = upper - lower;
            // Extents within float noise of the coordinates can't be split meaningfully
            let noise = (128.0 * FloatType::EPSILON * lower.abs().max(upper.abs())).max(1e-19);
            if extent <= noise {
                0.0
            } else {
                // Scaling down a bit keeps the upper bound strictly below BINS
                (BINS as FloatType) * 0.99 / extent
            }
        });

        BinMapping {
            offset: lower,
            scale,
        }
    }

    /// Index of the bin containing the point, clamped to the valid range.
    pub fn bin(&self, p: &WorldPoint) -> BinIndices {
        (p.coords - self.offset)
            .component_mul(&self.scale)
            .map(|x| (x.floor().max(0.0) as usize).min(BINS - 1))
    }

    /// World coordinate of the left boundary of a bin.
    pub fn pos(&self, bin: usize, axis: Axis) -> FloatType {
        let i = axis.index();
        (bin as FloatType) / self.scale[i] + self.offset[i]
    }

    /// Returns true if the axis has no extent and must not be split along.
    pub fn invalid(&self, axis: Axis) -> bool {
        self.scale[axis.index()] == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test::TriangleSoupWrapper;
    use assert2::assert;
    use test_case::test_case;
    use test_strategy::proptest;

    fn mapping_16(min: [FloatType; 3], max: [FloatType; 3]) -> BinMapping<16> {
        BinMapping::new(&WorldBox::new(min.into(), max.into()))
    }

    #[test]
    fn simple_mapping() {
        let m = mapping_16([0.0, 0.0, 0.0], [16.0, 32.0, 8.0]);

        assert!(m.bin(&WorldPoint::new(0.0, 0.0, 0.0)) == BinIndices::new(0, 0, 0));
        assert!(m.bin(&WorldPoint::new(5.5, 5.5, 5.5)) == BinIndices::new(5, 2, 10));
        assert!(m.bin(&WorldPoint::new(16.0, 32.0, 8.0)) == BinIndices::new(15, 15, 15));
    }

    #[test]
    fn out_of_range_is_clamped() {
        let m = mapping_16([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);

        assert!(m.bin(&WorldPoint::new(-5.0, 0.5, 100.0)) == BinIndices::new(0, 7, 15));
    }

    #[test_case([0.0, 0.0, 0.0], [1.0, 1.0, 0.0], Axis::Z; "flat z")]
    #[test_case([3.0, -2.0, 1.0], [3.0, 2.0, 5.0], Axis::X; "flat x")]
    #[test_case([1e6, 0.0, 0.0], [1e6 + 0.0625, 1.0, 1.0], Axis::X; "noise sized at large coordinates")]
    fn degenerate_axis(min: [FloatType; 3], max: [FloatType; 3], flat: Axis) {
        let m = mapping_16(min, max);
        for axis in Axis::ALL {
            assert!(m.invalid(axis) == (axis == flat), "axis: {axis}");
        }
    }

    #[test]
    fn small_but_valid_extent() {
        let m = mapping_16([0.0, 0.0, 0.0], [1e-3, 1e-3, 1e-3]);
        assert!(!Axis::ALL.iter().any(|axis| m.invalid(*axis)));
        assert!(m.bin(&WorldPoint::new(5e-4, 1e-3, 0.0)) == BinIndices::new(7, 15, 0));
    }

    #[test]
    fn empty_bounds_are_invalid() {
        let m = BinMapping::<16>::new(&WorldBox::empty());
        assert!(Axis::ALL.iter().all(|axis| m.invalid(*axis)));
        assert!(m.bin(&WorldPoint::origin()) == BinIndices::zeros());
    }

    #[test]
    fn pos_inverts_bin() {
        let m = mapping_16([-8.0, 0.0, 100.0], [8.0, 1.0, 132.0]);
        for axis in Axis::ALL {
            for bin in 0..16 {
                let mut p = WorldPoint::new(-8.0, 0.0, 100.0);
                // Slightly right of the boundary so that rounding can't push us to the previous bin
                p[axis.index()] = m.pos(bin, axis) + 1e-3;
                assert!(m.bin(&p)[axis.index()] == bin);
            }
        }
    }

    /// Corners of every primitive map into the bin range and the bin range covers the geometry
    #[proptest]
    fn bins_cover_geometry(soup: TriangleSoupWrapper) {
        let bounds = WorldBox::from_points(soup.iter().flat_map(|t| t.iter())).unwrap();
        let m = BinMapping::<32>::new(&bounds);

        for t in soup.iter() {
            let b = t.bounds();
            for corner in [b.min, b.max] {
                assert!(m.bin(&corner).iter().all(|i| *i < 32));
            }
        }

        for axis in Axis::ALL {
            if m.invalid(axis) {
                continue;
            }
            let i = axis.index();
            assert!(m.pos(0, axis) == bounds.min[i]);
            assert!(m.pos(32, axis) >= bounds.max[i]);
            // The upper corner never lands on the clamp
            assert!(((bounds.max[i] - bounds.min[i]) * m.scale[i]).floor() < 32.0);
        }
    }
}
