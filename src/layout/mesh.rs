//! Deterministic point layout for the sensor mesh view.
//!
//! Node positions come from a fixed sine-based hash of the node index, so the
//! same node count and drawable size always produce the same picture. That
//! lets the interaction layer recompute the layout on tap and map a screen
//! position back to a node without storing anything.
//!
//! For node `i`:
//! - `rx = fract(sin(2i + 7) * 43758.5453123)`
//! - `ry = fract(sin(2i + 13) * 43758.5453123)`
//! - `x = (inset + (1 - 2 * inset) * rx) * width`, likewise for `y`
//!
//! With the default inset of 0.08 every point falls inside the central
//! 8%..92% band of each axis.

use log::debug;
use serde::{Deserialize, Serialize};

use super::adjacency::{DEFAULT_THRESHOLD_RATIO, build_adjacency};
use crate::graph::{EdgeKey, Point2D};

/// Size of the drawable area the layout is fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSize {
    pub width: f64,
    pub height: f64,
}

impl LayoutSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length of the shorter side.
    #[inline]
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    /// Geometric centre of the area.
    #[inline]
    pub fn center(self) -> Point2D {
        Point2D::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Configuration for the mesh layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeshLayoutConfig {
    /// Fraction of each axis kept empty on both sides (default: 0.08).
    pub inset: f64,
    /// Seed offset for the x coordinate hash (default: 7).
    pub seed_offset_x: i64,
    /// Seed offset for the y coordinate hash (default: 13).
    pub seed_offset_y: i64,
    /// Multiplier applied to `sin(seed)` before taking the fraction
    /// (default: 43758.5453123).
    pub hash_multiplier: f64,
    /// Edge threshold as a fraction of the shorter side (default: 0.18).
    pub threshold_ratio: f64,
}

impl Default for MeshLayoutConfig {
    fn default() -> Self {
        Self {
            inset: 0.08,
            seed_offset_x: 7,
            seed_offset_y: 13,
            hash_multiplier: 43758.5453123,
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

impl MeshLayoutConfig {
    /// Fractional part of `sin(seed) * hash_multiplier`, in `[0, 1)`.
    #[inline]
    pub fn pseudo_random(&self, seed: i64) -> f64 {
        let s = (seed as f64).sin() * self.hash_multiplier;
        s - s.floor()
    }

    /// Connection threshold for a drawable of the given size.
    #[inline]
    pub fn threshold_for(&self, size: LayoutSize) -> f64 {
        size.min_side() * self.threshold_ratio
    }
}

/// Pseudo-random value for `seed` using the default transform.
pub fn pseudo_random(seed: i64) -> f64 {
    MeshLayoutConfig::default().pseudo_random(seed)
}

/// Generate `node_count` deterministic points inside `size`.
pub fn generate_points(node_count: usize, size: LayoutSize, config: &MeshLayoutConfig) -> Vec<Point2D> {
    let span = 1.0 - 2.0 * config.inset;

    (0..node_count)
        .map(|i| {
            let i = i as i64;
            let rx = config.pseudo_random(i * 2 + config.seed_offset_x);
            let ry = config.pseudo_random(i * 2 + config.seed_offset_y);
            Point2D::new(
                (config.inset + span * rx) * size.width,
                (config.inset + span * ry) * size.height,
            )
        })
        .collect()
}

/// A generated mesh: node positions plus the derived adjacency.
///
/// Edges are always recomputed from the nodes; there is no way to edit one
/// without the other.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    nodes: Vec<Point2D>,
    edges: Vec<EdgeKey>,
    threshold: f64,
}

impl GraphLayout {
    /// Generate a layout using the configured threshold ratio.
    pub fn generate(node_count: usize, size: LayoutSize, config: &MeshLayoutConfig) -> Self {
        Self::generate_with_threshold(node_count, size, config, config.threshold_for(size))
    }

    /// Generate a layout with an explicit connection threshold.
    pub fn generate_with_threshold(
        node_count: usize,
        size: LayoutSize,
        config: &MeshLayoutConfig,
        threshold: f64,
    ) -> Self {
        let nodes = generate_points(node_count, size, config);
        let layout = Self::from_nodes(nodes, threshold);
        debug!(
            "mesh layout: {} nodes, {} edges in {}x{} (threshold {:.2})",
            layout.nodes.len(),
            layout.edges.len(),
            size.width,
            size.height,
            threshold
        );
        layout
    }

    /// Build a layout from existing node positions.
    pub fn from_nodes(nodes: Vec<Point2D>, threshold: f64) -> Self {
        let edges = build_adjacency(&nodes, threshold);
        Self {
            nodes,
            edges,
            threshold,
        }
    }

    pub fn nodes(&self) -> &[Point2D] {
        &self.nodes
    }

    /// Edges in ascending `(i, j)` order.
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
