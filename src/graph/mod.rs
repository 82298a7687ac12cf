//! Sensor mesh graph.
//!
//! Node ids and positions, normalized edge keys, and the [`MeshGraph`] that
//! ties a generated layout to a petgraph adjacency graph and a spatial index.

mod edge;
mod mesh;
mod node;

pub use edge::EdgeKey;
pub use mesh::MeshGraph;
pub use node::{NodeId, Point2D};
