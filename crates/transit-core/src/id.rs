//! Strongly-typed identifiers for vertices, edges, entities, and ticks.

use std::fmt;

/// Identifies a vertex (station) within a network.
///
/// Vertices are created at network construction and assigned sequential
/// indices. `VertexId(n)` is the n-th vertex added. Indices are stable for
/// the lifetime of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    /// The index as a `usize`, for slice access.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a directed edge by its `(source, target)` vertex pair.
///
/// At most one edge exists per ordered pair, so the pair is the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// Vertex the edge leaves.
    pub source: VertexId,
    /// Vertex the edge arrives at.
    pub target: VertexId,
}

impl EdgeKey {
    /// Build a key for the edge `source → target`.
    pub fn new(source: VertexId, target: VertexId) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Unique identifier of a car.
///
/// Allocated by the entity registry from a dense, monotonically increasing
/// sequence starting at 0. Never reused after the car is destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub u64);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CarId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Unique identifier of a passenger.
///
/// Drawn from a sequence independent of [`CarId`]: the first car and the
/// first passenger both receive id 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassengerId(pub u64);

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PassengerId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing step counter.
///
/// Incremented each time the simulation completes one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_key_displays_as_source_dash_target() {
        let key = EdgeKey::new(VertexId(3), VertexId(7));
        assert_eq!(key.to_string(), "3-7");
    }

    #[test]
    fn edge_key_is_ordered_by_source_then_target() {
        let a = EdgeKey::new(VertexId(0), VertexId(5));
        let b = EdgeKey::new(VertexId(1), VertexId(0));
        let c = EdgeKey::new(VertexId(1), VertexId(2));
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn vertex_index_matches_inner_value() {
        assert_eq!(VertexId(42).index(), 42);
    }
}
