//! Linear nearest-point lookup.
//!
//! Resolves a tap to a mesh node. Ties go to the lowest index because the
//! scan only replaces the current best on a strictly smaller distance.

use log::trace;

use crate::error::{GeometryError, GeometryResult};
use crate::graph::Point2D;

/// Index of the node in `nodes` closest to `query`.
///
/// Returns [`GeometryError::EmptyInput`] when `nodes` is empty.
pub fn nearest_point(query: Point2D, nodes: &[Point2D]) -> GeometryResult<usize> {
    if nodes.is_empty() {
        return Err(GeometryError::EmptyInput);
    }

    let mut nearest_index = 0;
    let mut nearest_dist = f64::INFINITY;
    for (i, p) in nodes.iter().enumerate() {
        let d = p.distance(query);
        if d < nearest_dist {
            nearest_dist = d;
            nearest_index = i;
        }
    }

    trace!("nearest to ({:.1}, {:.1}): {} at {:.2}", query.x, query.y, nearest_index, nearest_dist);
    Ok(nearest_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_nearest_basic() {
        let nodes = triangle();
        assert_eq!(nearest_point(Point2D::new(1.0, 1.0), &nodes), Ok(0));
        assert_eq!(nearest_point(Point2D::new(9.0, 1.0), &nodes), Ok(1));
        assert_eq!(nearest_point(Point2D::new(1.0, 9.0), &nodes), Ok(2));
    }

    #[test]
    fn test_nearest_exact_hit() {
        let nodes = triangle();
        assert_eq!(nearest_point(Point2D::new(10.0, 0.0), &nodes), Ok(1));
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let nodes = triangle();
        // (5, 5) is sqrt(50) from all three nodes.
        assert_eq!(nearest_point(Point2D::new(5.0, 5.0), &nodes), Ok(0));
        // (10, 10) is equidistant from nodes 1 and 2.
        assert_eq!(nearest_point(Point2D::new(10.0, 10.0), &nodes), Ok(1));
    }

    #[test]
    fn test_duplicate_points() {
        let nodes = vec![Point2D::new(3.0, 3.0), Point2D::new(3.0, 3.0)];
        assert_eq!(nearest_point(Point2D::new(3.0, 3.0), &nodes), Ok(0));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            nearest_point(Point2D::new(0.0, 0.0), &[]),
            Err(GeometryError::EmptyInput)
        );
    }
}
