//! Threshold adjacency for mesh nodes.
//!
//! Two nodes are linked when their Euclidean distance is at most the
//! threshold. Node counts in the mesh view are small (tens at most), so the
//! all-pairs scan is fine.

use crate::graph::{EdgeKey, NodeId, Point2D};

/// Ratio of the shorter drawable side used as the default threshold.
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.18;

/// Default connection threshold for a `width` x `height` drawable.
pub fn default_threshold(width: f64, height: f64) -> f64 {
    width.min(height) * DEFAULT_THRESHOLD_RATIO
}

/// All pairs `(i, j)`, `i < j`, whose distance is `<= threshold`.
///
/// Pairs come out in lexicographic order. A negative or NaN threshold links
/// nothing.
pub fn build_adjacency(nodes: &[Point2D], threshold: f64) -> Vec<EdgeKey> {
    let mut edges = Vec::new();
    if threshold.is_nan() || threshold < 0.0 {
        return edges;
    }

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            if a.distance(*b) <= threshold {
                if let Some(key) = EdgeKey::new(NodeId(i as u32), NodeId(j as u32)) {
                    edges.push(key);
                }
            }
        }
    }

    edges
}
