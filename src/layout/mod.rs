//! Layout algorithms for the sensor mesh view.
//!
//! This module computes where mesh nodes are drawn and which of them are
//! linked. Both results are pure functions of their inputs, so the rendering
//! and interaction layers can recompute them on every frame or tap.

pub mod adjacency;
pub mod mesh;

pub use adjacency::{build_adjacency, default_threshold};
pub use mesh::{GraphLayout, LayoutSize, MeshLayoutConfig, generate_points};
