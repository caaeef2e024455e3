pub mod geometry;
pub mod scene;
pub mod spatial_split;

pub use scene::{PrimInfo, PrimRef, TriangleMesh};
pub use spatial_split::{
    BinAccumulator, BinMapping, Clipper, SplitSettings, SpatialSplit, WorkerCount,
    find_spatial_split,
};
