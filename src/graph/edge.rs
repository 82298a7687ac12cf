//! Edge keys for the sensor mesh.
//!
//! Mesh edges are undirected. An [`EdgeKey`] stores its endpoints in
//! ascending order so each link has exactly one representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Normalized unordered pair of node ids, `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    lo: NodeId,
    hi: NodeId,
}

impl EdgeKey {
    /// Create a key from two endpoints in either order.
    ///
    /// Returns `None` for a self-edge.
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lower endpoint.
    #[inline]
    pub fn lo(self) -> NodeId {
        self.lo
    }

    /// The higher endpoint.
    #[inline]
    pub fn hi(self) -> NodeId {
        self.hi
    }

    /// Endpoints as layout indices `(i, j)` with `i < j`.
    #[inline]
    pub fn indices(self) -> (usize, usize) {
        (self.lo.index(), self.hi.index())
    }

    /// The endpoint opposite `node`, if `node` is on this edge.
    pub fn other(self, node: NodeId) -> Option<NodeId> {
        if node == self.lo {
            Some(self.hi)
        } else if node == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({}-{})", self.lo.0, self.hi.0)
    }
}
