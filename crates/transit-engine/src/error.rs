//! Errors returned by engine operations.

use thiserror::Error;
use transit_core::{EntityError, VertexId};
use transit_net::NetError;

/// Failure of a caller-initiated engine operation (spawn, transfer,
/// routing, lookup).
///
/// A failed operation leaves the simulation unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Topology lookup or routing failed.
    #[error(transparent)]
    Net(#[from] NetError),
    /// An entity id did not resolve.
    #[error(transparent)]
    Entity(#[from] EntityError),
    /// An explicit route listed no vertices.
    #[error("explicit route is empty")]
    EmptyRoute,
    /// An explicit route does not start where the entity is spawned.
    #[error("route starts at vertex {found}, expected vertex {expected}")]
    RouteStartMismatch {
        /// The spawn vertex.
        expected: VertexId,
        /// The first vertex of the supplied route.
        found: VertexId,
    },
    /// A random destination was requested on a network with no other vertex.
    #[error("no destination other than vertex {at} exists")]
    NoDestination {
        /// The spawn vertex.
        at: VertexId,
    },
    /// A car was placed on an edge that does not exist.
    #[error("no edge {from}-{to}")]
    NoSuchEdge {
        /// Requested edge source.
        from: VertexId,
        /// Requested edge target.
        to: VertexId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_core::VertexRef;

    #[test]
    fn net_errors_pass_through_display() {
        let err: EngineError = NetError::UnknownVertex {
            reference: VertexRef::Name("Q".into()),
        }
        .into();
        assert_eq!(err.to_string(), "unknown vertex 'Q'");
    }

    #[test]
    fn mismatch_names_both_vertices() {
        let err = EngineError::RouteStartMismatch {
            expected: VertexId(0),
            found: VertexId(3),
        };
        assert_eq!(err.to_string(), "route starts at vertex 3, expected vertex 0");
    }
}
