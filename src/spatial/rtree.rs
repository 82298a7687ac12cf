//! R-tree based spatial index using the rstar crate.
//!
//! Backs the radius-bounded queries of the mesh view:
//! - Nearest neighbor (lowest id on ties, matching the linear scan)
//! - Nearest neighbor within a tap radius
//! - Point-in-radius
//! - Rectangle intersection

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::graph::{NodeId, Point2D};

/// A point in the spatial index with associated node ID.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// The node identifier.
    pub id: NodeId,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl NodePoint {
    /// Create a new NodePoint.
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        (self.x - point[0]).abs() < f64::EPSILON && (self.y - point[1]).abs() < f64::EPSILON
    }
}

/// Spatial index over mesh nodes.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load an index from layout positions; node `i` gets `NodeId(i)`.
    pub fn from_points(points: &[Point2D]) -> Self {
        let node_points: Vec<_> = points
            .iter()
            .enumerate()
            .map(|(i, p)| NodePoint::new(NodeId(i as u32), p.x, p.y))
            .collect();

        Self {
            tree: RTree::bulk_load(node_points),
        }
    }

    /// Find the nearest node to a point.
    ///
    /// Among equidistant nodes the lowest id is returned.
    pub fn nearest(&self, x: f64, y: f64) -> Option<NodeId> {
        self.nearest_entry(x, y).map(|point| point.id)
    }

    /// Find the nearest node within a maximum distance.
    ///
    /// A negative or NaN distance matches nothing.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<NodeId> {
        if max_distance.is_nan() || max_distance < 0.0 {
            return None;
        }
        let max_distance_sq = max_distance * max_distance;
        self.nearest_entry(x, y)
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.id)
    }

    fn nearest_entry(&self, x: f64, y: f64) -> Option<&NodePoint> {
        let best = self.tree.nearest_neighbor(&[x, y])?;
        let best_distance_sq = best.distance_2(&[x, y]);
        let tied = self
            .tree
            .locate_within_distance([x, y], best_distance_sq)
            .min_by_key(|point| point.id);
        Some(tied.unwrap_or(best))
    }

    /// Find all nodes within a rectangle, in ascending id order.
    pub fn in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<NodeId> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        let mut ids: Vec<_> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|point| point.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Find all nodes within a radius of a point, in ascending id order.
    pub fn in_radius(&self, x: f64, y: f64, radius: f64) -> Vec<NodeId> {
        if radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }
        let radius_sq = radius * radius;
        let mut ids: Vec<_> = self
            .tree
            .locate_within_distance([x, y], radius_sq)
            .map(|point| point.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::nearest_point;

    fn index_of(points: &[(f64, f64)]) -> SpatialIndex {
        let points: Vec<Point2D> = points.iter().map(|&p| p.into()).collect();
        SpatialIndex::from_points(&points)
    }

    #[test]
    fn test_nearest() {
        let index = index_of(&[(0.0, 0.0), (10.0, 10.0), (5.0, 5.0)]);

        assert_eq!(index.nearest(0.0, 0.0), Some(NodeId(0)));
        assert_eq!(index.nearest(6.0, 6.0), Some(NodeId(2)));
        assert_eq!(index.nearest(11.0, 11.0), Some(NodeId(1)));
    }

    #[test]
    fn test_nearest_tie_prefers_lowest_id() {
        let index = index_of(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        assert_eq!(index.nearest(5.0, 5.0), Some(NodeId(0)));
        assert_eq!(index.nearest(10.0, 10.0), Some(NodeId(1)));

        let duplicates = index_of(&[(4.0, 4.0), (1.0, 1.0), (1.0, 1.0)]);
        assert_eq!(duplicates.nearest(1.0, 1.0), Some(NodeId(1)));
    }

    #[test]
    fn test_nearest_within() {
        let index = index_of(&[(0.0, 0.0), (10.0, 10.0)]);

        assert_eq!(index.nearest_within(0.0, 0.0, 5.0), Some(NodeId(0)));

        // Nothing within 1 of (5, 5)
        assert_eq!(index.nearest_within(5.0, 5.0, 1.0), None);

        // Both nodes are ~7.07 from (5, 5); the lower id wins.
        assert_eq!(index.nearest_within(5.0, 5.0, 8.0), Some(NodeId(0)));
    }

    #[test]
    fn test_in_rect() {
        let index = index_of(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);

        let in_rect = index.in_rect(-1.0, -1.0, 6.0, 6.0);
        assert_eq!(in_rect, vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    fn test_in_radius() {
        let index = index_of(&[(0.0, 0.0), (3.0, 0.0), (10.0, 0.0)]);

        let in_radius = index.in_radius(0.0, 0.0, 5.0);
        assert_eq!(in_radius, vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    fn test_negative_radius_matches_nothing() {
        let index = index_of(&[(0.0, 0.0), (3.0, 0.0)]);

        assert_eq!(index.nearest_within(0.0, 0.0, -5.0), None);
        assert!(index.in_radius(0.0, 0.0, -5.0).is_empty());
        assert_eq!(index.nearest_within(0.0, 0.0, f64::NAN), None);
        assert!(index.in_radius(0.0, 0.0, f64::NAN).is_empty());

        // Zero still matches a node sitting on the query point.
        assert_eq!(index.nearest_within(0.0, 0.0, 0.0), Some(NodeId(0)));
    }

    #[test]
    fn test_empty() {
        let index = SpatialIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.nearest(0.0, 0.0), None);
        assert_eq!(index.nearest_within(0.0, 0.0, 100.0), None);
    }

    #[test]
    fn test_agrees_with_linear_scan() {
        let points: Vec<Point2D> = (0..40)
            .map(|i| Point2D::new((i * 29 % 83) as f64, (i * 17 % 71) as f64))
            .collect();
        let index = SpatialIndex::from_points(&points);
        assert_eq!(index.len(), 40);

        for qx in (0..90).step_by(7) {
            for qy in (0..80).step_by(9) {
                let query = Point2D::new(qx as f64 + 0.5, qy as f64 + 0.25);
                let linear = nearest_point(query, &points).unwrap();
                assert_eq!(index.nearest(query.x, query.y), Some(NodeId(linear as u32)));
            }
        }
    }
}
