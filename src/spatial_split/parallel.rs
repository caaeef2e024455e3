use std::{num::NonZeroUsize, thread};

use itertools::Itertools as _;

use crate::scene::PrimRef;

use super::{BinAccumulator, BinMapping, Clipper, SplitSettings};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WorkerCount {
    #[default]
    Auto,
    Manual(NonZeroUsize),
}

impl WorkerCount {
    pub fn get(&self) -> usize {
        match self {
            WorkerCount::Auto => num_cpus::get(),
            WorkerCount::Manual(num) => num.get(),
        }
    }
}

/// Bins primitives on multiple threads.
///
/// Primitives are split into contiguous chunks, each chunk is binned into its own accumulator
/// and the partial accumulators are merged in a tree reduction.
/// Gives exactly the same result as binning everything on a single thread.
pub fn bin_parallel<C: Clipper + Sync, const BINS: usize>(
    clipper: &C,
    prims: &[PrimRef],
    mapping: &BinMapping<BINS>,
    settings: &SplitSettings,
) -> BinAccumulator<BINS> {
    let chunk_size = chunk_size(prims.len(), settings.worker_count.get(), settings.min_chunk_size);
    tracing::debug!(
        prims = prims.len(),
        chunk_size,
        chunks = prims.len().div_ceil(chunk_size),
        "Binning in parallel"
    );

    let partial: Vec<BinAccumulator<BINS>> = thread::scope(|scope| {
        let handles = prims
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                scope.spawn(move || {
                    tracing::trace!(chunk_index, prims = chunk.len(), "Binning chunk");
                    let mut accumulator = BinAccumulator::new();
                    accumulator.bin(clipper, chunk, mapping);
                    accumulator
                })
            })
            .collect_vec();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    tree_reduce(partial)
}

/// Number of primitives per worker, the last chunk may be shorter.
fn chunk_size(prim_count: usize, worker_count: usize, min_chunk_size: usize) -> usize {
    prim_count
        .div_ceil(worker_count.max(1))
        .max(min_chunk_size)
        .max(1)
}

/// Merges neighbouring pairs of accumulators until only one is left.
fn tree_reduce<const BINS: usize>(mut level: Vec<BinAccumulator<BINS>>) -> BinAccumulator<BINS> {
    while level.len() > 1 {
        level = level
            .into_iter()
            .chunks(2)
            .into_iter()
            .map(|mut pair| {
                let first = pair.next().unwrap_or_default();
                pair.fold(first, |acc, other| acc.merged(&other))
            })
            .collect();
    }
    level.pop().unwrap_or_default()
}
