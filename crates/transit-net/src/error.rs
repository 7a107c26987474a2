//! Error types for network construction and routing queries.

use thiserror::Error;
use transit_core::{VertexId, VertexRef};

/// Errors arising from network construction or topology queries.
///
/// Construction errors (`InvalidWeight`, `DuplicateName`, `DuplicateEdge`)
/// are raised eagerly by [`Network`](crate::Network) mutators and
/// [`NetworkBuilder::build`](crate::NetworkBuilder::build), never deferred
/// to simulation time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NetError {
    /// The reference names no vertex: index out of range or unknown name.
    #[error("unknown vertex {reference}")]
    UnknownVertex {
        /// The reference that failed to resolve.
        reference: VertexRef,
    },
    /// No directed path exists between the two vertices.
    #[error("cannot find route from vertex {from} to vertex {to}")]
    RouteNotFound {
        /// Start of the requested route.
        from: VertexId,
        /// Unreachable destination.
        to: VertexId,
    },
    /// Edge weights must be strictly positive.
    #[error("edge {from}-{to} must have a positive weight")]
    InvalidWeight {
        /// Edge source.
        from: VertexId,
        /// Edge target.
        to: VertexId,
    },
    /// Vertex names must be unique within a network.
    #[error("vertex name '{name}' is already taken")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
    /// At most one edge may exist per ordered vertex pair.
    #[error("edge {from}-{to} already exists")]
    DuplicateEdge {
        /// Edge source.
        from: VertexId,
        /// Edge target.
        to: VertexId,
    },
}
