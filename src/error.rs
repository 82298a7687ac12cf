//! Error types for geometry queries.
//!
//! Most operations in this crate are total. The lookup and graph queries that
//! can fail report it through [`GeometryError`].

use thiserror::Error;

use crate::graph::NodeId;

pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Nearest-point lookup over an empty node sequence.
    #[error("nearest-point lookup on an empty node sequence")]
    EmptyInput,

    /// A mesh query referenced a node outside the layout.
    #[error("unknown mesh node: {0}")]
    UnknownNode(NodeId),

    /// Sighting data (JSON or a JS value) could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for GeometryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
