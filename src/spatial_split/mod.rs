mod binning;
mod mapping;
mod parallel;
mod search;

pub use binning::{BinAccumulator, BinCounts};
pub use mapping::{BinIndices, BinMapping};
pub use parallel::{WorkerCount, bin_parallel};
pub use search::SpatialSplit;

use bon::Builder;

use crate::{
    geometry::{Axis, FloatType},
    scene::{PrimInfo, PrimRef},
};

/// Splits primitive fragments with axis aligned planes.
///
/// Implemented by anything that can tell the exact bounds of a primitive clipped
/// to a half space, the binning only ever sees the resulting boxes.
pub trait Clipper {
    /// Per primitive data fetched once and reused for all clips of that primitive.
    type Geometry;

    fn geometry(&self, primitive: &PrimRef) -> Self::Geometry;

    /// Splits a fragment of the primitive at `position` along `axis`.
    /// Returns the parts below and above the plane, either of them may have empty bounds.
    fn clip(
        &self,
        geometry: &Self::Geometry,
        fragment: &PrimRef,
        axis: Axis,
        position: FloatType,
    ) -> (PrimRef, PrimRef);
}

#[derive(Clone, Debug, Builder)]
pub struct SplitSettings {
    /// Primitive counts get rounded up to multiples of `1 << blocks_shift` in the SAH
    #[builder(default = 0)]
    pub blocks_shift: u32,

    #[builder(default)]
    pub worker_count: WorkerCount,

    /// Below this many primitives the binning runs on the calling thread
    #[builder(default = 4096)]
    pub parallel_threshold: usize,

    #[builder(default = 1024)]
    pub min_chunk_size: usize,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Bins the primitives and finds the cheapest spatial split plane.
///
/// Returns `None` when there is nothing to split or no plane separates the primitives.
pub fn find_spatial_split<C: Clipper + Sync, const BINS: usize>(
    clipper: &C,
    prims: &[PrimRef],
    settings: &SplitSettings,
) -> Option<SpatialSplit<BINS>> {
    let info = PrimInfo::from_prims(prims);
    if info.is_empty() {
        return None;
    }

    let mapping = BinMapping::<BINS>::new(&info.geometry_bounds);

    let accumulator = if prims.len() < settings.parallel_threshold {
        let mut accumulator = BinAccumulator::new();
        accumulator.bin(clipper, prims, &mapping);
        accumulator
    } else {
        bin_parallel(clipper, prims, &mapping, settings)
    };

    let split = accumulator.best(&mapping, settings.blocks_shift);
    match &split {
        Some(split) => tracing::debug!(
            prims = info.count,
            sah = split.sah(),
            axis = %split.axis(),
            position = split.position(),
            "Found spatial split"
        ),
        None => tracing::debug!(prims = info.count, "No spatial split"),
    }
    split
}
