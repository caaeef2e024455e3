use std::fmt::Display;

use assert2::assert;
use ordered_float::OrderedFloat;

use crate::geometry::{Axis, FloatType, WorldBox};

use super::{BinAccumulator, BinMapping, binning::BinCounts};

/// Chosen spatial split.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialSplit<const BINS: usize> {
    sah: FloatType,
    axis: Axis,
    /// Index of the bin boundary, always in 1..BINS
    position: usize,
    mapping: BinMapping<BINS>,
}

impl<const BINS: usize> SpatialSplit<BINS> {
    /// Cost of the split, comparable only to other splits of the same primitives.
    pub fn sah(&self) -> FloatType {
        self.sah
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Bin boundary index of the split
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn mapping(&self) -> &BinMapping<BINS> {
        &self.mapping
    }

    /// World space coordinate of the splitting plane along the split axis
    pub fn plane_position(&self) -> FloatType {
        self.mapping.pos(self.position, self.axis)
    }
}

impl<const BINS: usize> Display for SpatialSplit<BINS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpatialSplit {{ sah = {}, axis = {}, pos = {} }}",
            self.sah, self.axis, self.position
        )
    }
}

/// Running union of bin bounds and sum of counts for all three axes.
struct Sweep {
    bounds: [WorldBox; 3],
    count: BinCounts,
}

impl Sweep {
    fn new() -> Self {
        Sweep {
            bounds: [WorldBox::empty(); 3],
            count: BinCounts::zeros(),
        }
    }

    fn add(&mut self, bounds: &[WorldBox; 3], count: &BinCounts) {
        for (b, other) in self.bounds.iter_mut().zip(bounds) {
            b.extend(other);
        }
        self.count += count;
    }

    /// Half areas of the accumulated boxes, None where the box is still empty.
    fn half_areas(&self) -> [Option<FloatType>; 3] {
        self.bounds
            .each_ref()
            .map(|b| if b.is_empty() { None } else { Some(b.half_area()) })
    }
}

impl<const BINS: usize> BinAccumulator<BINS> {
    /// Finds the split with the lowest surface area heuristic cost.
    ///
    /// Primitive counts on each side are rounded up to multiples of `1 << blocks_shift`,
    /// because leaves are intersected in blocks of that size.
    /// Returns None if no axis allows a split.
    pub fn best(&self, mapping: &BinMapping<BINS>, blocks_shift: u32) -> Option<SpatialSplit<BINS>> {
        assert!(blocks_shift < usize::BITS);

        // Sweep from right to left, right side of boundary i is made of bins i..BINS
        let mut right_areas = [[None; 3]; BINS];
        let mut right_counts = [BinCounts::zeros(); BINS];
        let mut sweep = Sweep::new();
        for i in (1..BINS).rev() {
            sweep.add(&self.bounds[i], &self.end_counts[i]);
            right_areas[i] = sweep.half_areas();
            right_counts[i] = sweep.count;
        }

        let blocks_add = (1usize << blocks_shift) - 1;
        let blocks = |count: usize| ((count + blocks_add) >> blocks_shift) as FloatType;

        // Sweep from left to right and evaluate the cost at each boundary
        let mut best_sah = [FloatType::INFINITY; 3];
        let mut best_pos = [0usize; 3];
        let mut sweep = Sweep::new();
        for i in 1..BINS {
            sweep.add(&self.bounds[i - 1], &self.begin_counts[i - 1]);
            let left_areas = sweep.half_areas();

            for dim in 0..3 {
                // One of the sides is empty, this is not a split
                let (Some(left_area), Some(right_area)) = (left_areas[dim], right_areas[i][dim])
                else {
                    continue;
                };
                let sah = left_area * blocks(sweep.count[dim])
                    + right_area * blocks(right_counts[i][dim]);
                if sah < best_sah[dim] {
                    best_sah[dim] = sah;
                    best_pos[dim] = i;
                }
            }
        }

        // min_by_key keeps the first of equal elements, so lower axes win ties
        let axis = Axis::ALL
            .into_iter()
            .filter(|axis| !mapping.invalid(*axis) && best_pos[axis.index()] != 0)
            .min_by_key(|axis| OrderedFloat(best_sah[axis.index()]))?;

        Some(SpatialSplit {
            sah: best_sah[axis.index()],
            axis,
            position: best_pos[axis.index()],
            mapping: *mapping,
        })
    }
}
