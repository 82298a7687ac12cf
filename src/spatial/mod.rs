//! Spatial queries over mesh nodes.
//!
//! - `nearest`: linear nearest-point lookup used to resolve taps
//! - `rtree`: R-tree spatial index for radius-bounded hit testing

mod nearest;
mod rtree;

pub use nearest::nearest_point;
pub use rtree::SpatialIndex;
