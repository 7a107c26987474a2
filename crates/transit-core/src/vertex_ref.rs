//! Caller-facing vertex identifiers.
//!
//! Drivers name stations either by index or by name. [`VertexRef`] carries
//! that choice until the network resolves it to a [`VertexId`](crate::VertexId);
//! nothing past the resolution boundary sees a `VertexRef`.

use std::fmt;

/// A vertex named by index or by human-readable name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexRef {
    /// Vertex index as assigned at construction.
    Index(u32),
    /// Unique vertex name.
    Name(String),
}

impl fmt::Display for VertexRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

impl From<u32> for VertexRef {
    fn from(i: u32) -> Self {
        Self::Index(i)
    }
}

impl From<crate::VertexId> for VertexRef {
    fn from(v: crate::VertexId) -> Self {
        Self::Index(v.0)
    }
}

impl From<&str> for VertexRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for VertexRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&VertexRef> for VertexRef {
    fn from(r: &VertexRef) -> Self {
        r.clone()
    }
}
