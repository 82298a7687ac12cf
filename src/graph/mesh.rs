//! MeshGraph - one generated sensor mesh and its derived structures.
//!
//! The MeshGraph owns a [`GraphLayout`] and builds two views of it:
//! - a petgraph `UnGraph` over the threshold edges (weight = edge length)
//!   for neighbour and connectivity queries
//! - an R-tree [`SpatialIndex`] for radius-bounded hit testing
//!
//! Node `i` of the layout is petgraph `NodeIndex(i)` and `NodeId(i)`. The
//! mesh is immutable after construction; a new drawable size means a new
//! MeshGraph.

use log::debug;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use super::node::{NodeId, Point2D};
use crate::error::{GeometryError, GeometryResult};
use crate::layout::{GraphLayout, LayoutSize, MeshLayoutConfig};
use crate::spatial::{SpatialIndex, nearest_point};

pub struct MeshGraph {
    /// Node positions and threshold edges.
    layout: GraphLayout,

    /// Adjacency graph; node weights are the stable ids.
    graph: UnGraph<NodeId, f64>,

    /// Spatial index for hit testing
    spatial: SpatialIndex,
}

impl MeshGraph {
    /// Generate a mesh of `node_count` sensors fitted to `size`.
    pub fn generate(node_count: usize, size: LayoutSize, config: &MeshLayoutConfig) -> Self {
        Self::from_layout(GraphLayout::generate(node_count, size, config))
    }

    /// Build the graph and spatial index for an existing layout.
    pub fn from_layout(layout: GraphLayout) -> Self {
        let nodes = layout.nodes();
        let mut graph: UnGraph<NodeId, f64> = UnGraph::with_capacity(nodes.len(), layout.edges().len());

        for i in 0..nodes.len() {
            graph.add_node(NodeId(i as u32));
        }
        for edge in layout.edges() {
            let (i, j) = edge.indices();
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), nodes[i].distance(nodes[j]));
        }

        let spatial = SpatialIndex::from_points(nodes);
        debug!(
            "mesh graph: {} nodes, {} edges, {} components",
            graph.node_count(),
            graph.edge_count(),
            connected_components(&graph)
        );

        Self {
            layout,
            graph,
            spatial,
        }
    }

    pub fn layout(&self) -> &GraphLayout {
        &self.layout
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// Get the number of nodes.
    pub fn node_count(&self) -> u32 {
        self.graph.node_count() as u32
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> u32 {
        self.graph.edge_count() as u32
    }

    /// Get a node's position.
    pub fn position(&self, id: NodeId) -> GeometryResult<Point2D> {
        let index = self.index_of(id)?;
        Ok(self.layout.nodes()[index.index()])
    }

    /// Get neighbors of a node, in ascending id order.
    pub fn neighbors(&self, id: NodeId) -> GeometryResult<Vec<NodeId>> {
        let index = self.index_of(id)?;
        let mut neighbors: Vec<_> = self
            .graph
            .neighbors(index)
            .filter_map(|n| self.graph.node_weight(n).copied())
            .collect();
        neighbors.sort_unstable();
        Ok(neighbors)
    }

    /// Number of edges touching a node.
    pub fn degree(&self, id: NodeId) -> GeometryResult<usize> {
        let index = self.index_of(id)?;
        Ok(self.graph.edges(index).count())
    }

    /// Length of the edge between `a` and `b`, or `None` if they are not
    /// linked.
    pub fn edge_length(&self, a: NodeId, b: NodeId) -> GeometryResult<Option<f64>> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        Ok(self
            .graph
            .find_edge(a, b)
            .and_then(|edge| self.graph.edge_weight(edge).copied()))
    }

    /// Number of connected groups of sensors. Isolated nodes count as one
    /// group each.
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Resolve a query point to the nearest node.
    ///
    /// Fails with [`GeometryError::EmptyInput`] on an empty mesh.
    pub fn nearest_node(&self, query: Point2D) -> GeometryResult<NodeId> {
        nearest_point(query, self.layout.nodes()).map(|i| NodeId(i as u32))
    }

    /// Nearest node to `query` if it lies within `radius`.
    pub fn hit_test(&self, query: Point2D, radius: f64) -> Option<NodeId> {
        self.spatial.nearest_within(query.x, query.y, radius)
    }

    /// All nodes within `radius` of `query`, ascending.
    pub fn nodes_within(&self, query: Point2D, radius: f64) -> Vec<NodeId> {
        self.spatial.in_radius(query.x, query.y, radius)
    }

    /// All nodes inside the rectangle, ascending.
    pub fn nodes_in_rect(&self, min: Point2D, max: Point2D) -> Vec<NodeId> {
        self.spatial.in_rect(min.x, min.y, max.x, max.y)
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Positions as `[x0, y0, x1, y1, ...]`.
    pub fn positions_flat(&self) -> Vec<f64> {
        self.layout.nodes().iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Edges as `[i0, j0, i1, j1, ...]` with `i < j` in each pair.
    pub fn edges_flat(&self) -> Vec<u32> {
        self.layout
            .edges()
            .iter()
            .flat_map(|e| [e.lo().raw(), e.hi().raw()])
            .collect()
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of all nodes.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let nodes = self.layout.nodes();
        let first = nodes.first()?;
        Some(nodes.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)),
        ))
    }

    fn index_of(&self, id: NodeId) -> GeometryResult<NodeIndex> {
        if id.index() < self.graph.node_count() {
            Ok(NodeIndex::new(id.index()))
        } else {
            Err(GeometryError::UnknownNode(id))
        }
    }
}
