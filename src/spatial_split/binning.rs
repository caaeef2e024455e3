use std::ops::Range;

use nalgebra::Vector3;

use crate::{
    geometry::{Axis, WorldBox},
    scene::PrimRef,
};

use super::{BinMapping, Clipper};

pub type BinCounts = Vector3<usize>;

/// Per bin and axis bounds of clipped primitive fragments, with counts of primitives
/// starting and ending in each bin.
///
/// Each worker fills its own accumulator, partial results are combined with `merge`.
#[derive(Clone, Debug, PartialEq)]
pub struct BinAccumulator<const BINS: usize> {
    /// Indexed by bin, then by axis
    pub(super) bounds: [[WorldBox; 3]; BINS],
    pub(super) begin_counts: [BinCounts; BINS],
    pub(super) end_counts: [BinCounts; BINS],
}

impl<const BINS: usize> BinAccumulator<BINS> {
    pub fn new() -> Self {
        BinAccumulator {
            bounds: [[WorldBox::empty(); 3]; BINS],
            begin_counts: [BinCounts::zeros(); BINS],
            end_counts: [BinCounts::zeros(); BINS],
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Bins a slice of primitives.
    ///
    /// Every primitive is clipped at all bin boundaries it straddles, separately along each axis,
    /// and the fragments are added to bounds of their bins. Each primitive is counted once
    /// per axis as beginning in its first bin and ending in its last one.
    /// Primitives with empty bounds are skipped.
    pub fn bin<C: Clipper>(&mut self, clipper: &C, prims: &[PrimRef], mapping: &BinMapping<BINS>) {
        for prim in prims {
            self.bin_one(clipper, prim, mapping);
        }
    }

    /// Bins a range of primitives inside a slice.
    pub fn bin_range<C: Clipper>(
        &mut self,
        clipper: &C,
        prims: &[PrimRef],
        range: Range<usize>,
        mapping: &BinMapping<BINS>,
    ) {
        self.bin(clipper, &prims[range], mapping)
    }

    fn bin_one<C: Clipper>(&mut self, clipper: &C, prim: &PrimRef, mapping: &BinMapping<BINS>) {
        // Fragments clipped away entirely don't take part in any split
        if prim.bounds.is_empty() {
            return;
        }

        let geometry = clipper.geometry(prim);
        let bin0 = mapping.bin(&prim.bounds.min);
        let bin1 = mapping.bin(&prim.bounds.max);

        for axis in Axis::ALL {
            let dim = axis.index();
            let (first, last) = (bin0[dim], bin1[dim]);
            let mut rest = *prim;
            let mut begin = first;
            let mut end = last;

            for bin in first..last {
                let position = mapping.pos(bin + 1, axis);
                let (left, right) = clipper.clip(&geometry, &rest, axis, position);

                // Clipping noise can make the primitive miss its first bins entirely,
                // it begins later then.
                if left.bounds.is_empty() {
                    begin += 1;
                }

                self.bounds[bin][dim].extend(&left.bounds);
                rest = right;
            }

            if rest.bounds.is_empty() {
                end -= 1;
            }

            self.begin_counts[begin][dim] += 1;
            self.end_counts[end][dim] += 1;
            self.bounds[last][dim].extend(&rest.bounds);
        }
    }

    /// Adds binning information from another accumulator.
    pub fn merge(&mut self, other: &Self) {
        for i in 0..BINS {
            self.begin_counts[i] += other.begin_counts[i];
            self.end_counts[i] += other.end_counts[i];
            for (bounds, other_bounds) in self.bounds[i].iter_mut().zip(&other.bounds[i]) {
                bounds.extend(other_bounds);
            }
        }
    }

    /// Consuming variant of `merge`, convenient for reductions.
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// Union of fragment bounds in a bin, as binned along the axis.
    pub fn bin_bounds(&self, bin: usize, axis: Axis) -> &WorldBox {
        &self.bounds[bin][axis.index()]
    }

    /// Number of primitives that begin in the bin along the axis.
    pub fn begin_count(&self, bin: usize, axis: Axis) -> usize {
        self.begin_counts[bin][axis.index()]
    }

    /// Number of primitives that end in the bin along the axis.
    pub fn end_count(&self, bin: usize, axis: Axis) -> usize {
        self.end_counts[bin][axis.index()]
    }
}

impl<const BINS: usize> Default for BinAccumulator<BINS> {
    fn default() -> Self {
        Self::new()
    }
}
