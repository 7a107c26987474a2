//! Declarative network construction.

use transit_core::{VertexId, VertexRef};

use crate::error::NetError;
use crate::network::{Network, DEFAULT_WEIGHT};

/// A pending edge, recorded by reference and resolved at build time.
#[derive(Clone, Debug)]
struct EdgeSpec {
    from: VertexRef,
    to: VertexRef,
    weight: u32,
    both_ways: bool,
}

/// Builder for [`Network`].
///
/// Vertices are added first (named or anonymous), edges refer to them by
/// [`VertexRef`]. Nothing is validated until [`build()`](Self::build), which
/// adds vertices in declaration order, then edges in declaration order, and
/// stops at the first error.
///
/// # Examples
///
/// ```
/// use transit_net::NetworkBuilder;
///
/// let net = NetworkBuilder::new()
///     .vertices(["Depot", "Market", "Harbour"])
///     .road("Depot", "Market", 2)
///     .edge("Market", "Harbour", 1)
///     .build()
///     .unwrap();
///
/// assert_eq!(net.vertex_count(), 3);
/// assert_eq!(net.edge_count(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NetworkBuilder {
    vertices: Vec<Option<String>>,
    edges: Vec<EdgeSpec>,
}

impl NetworkBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one named vertex.
    pub fn vertex(mut self, name: impl Into<String>) -> Self {
        self.vertices.push(Some(name.into()));
        self
    }

    /// Add named vertices in order.
    pub fn vertices<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vertices.extend(names.into_iter().map(|n| Some(n.into())));
        self
    }

    /// Add `count` unnamed vertices.
    pub fn anonymous(mut self, count: u32) -> Self {
        self.vertices.extend((0..count).map(|_| None));
        self
    }

    /// Add a directed edge. Must have a positive weight.
    pub fn edge(
        mut self,
        from: impl Into<VertexRef>,
        to: impl Into<VertexRef>,
        weight: u32,
    ) -> Self {
        self.edges.push(EdgeSpec {
            from: from.into(),
            to: to.into(),
            weight,
            both_ways: false,
        });
        self
    }

    /// Add edges in both directions with the same weight.
    pub fn road(mut self, a: impl Into<VertexRef>, b: impl Into<VertexRef>, weight: u32) -> Self {
        self.edges.push(EdgeSpec {
            from: a.into(),
            to: b.into(),
            weight,
            both_ways: true,
        });
        self
    }

    /// Add a directed edge with [`DEFAULT_WEIGHT`].
    pub fn link(self, from: impl Into<VertexRef>, to: impl Into<VertexRef>) -> Self {
        self.edge(from, to, DEFAULT_WEIGHT)
    }

    /// Add a chain of bidirectional roads through `stops`, all with
    /// [`DEFAULT_WEIGHT`].
    pub fn line<I, R>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<VertexRef>,
    {
        let stops: Vec<VertexRef> = stops.into_iter().map(Into::into).collect();
        for pair in stops.windows(2) {
            self = self.road(pair[0].clone(), pair[1].clone(), DEFAULT_WEIGHT);
        }
        self
    }

    /// Build the network.
    ///
    /// # Errors
    ///
    /// Returns the first of:
    /// - `DuplicateName` for a repeated vertex name
    /// - `UnknownVertex` for an edge endpoint that resolves to nothing
    /// - `InvalidWeight` for a zero weight
    /// - `DuplicateEdge` for a repeated ordered pair
    pub fn build(self) -> Result<Network, NetError> {
        let mut net = Network::new();
        for name in &self.vertices {
            net.add_vertex(name.as_deref())?;
        }
        for spec in &self.edges {
            let from: VertexId = net.resolve(&spec.from)?;
            let to: VertexId = net.resolve(&spec.to)?;
            if spec.both_ways {
                net.add_road(from, to, spec.weight)?;
            } else {
                net.add_edge(from, to, spec.weight)?;
            }
        }
        Ok(net)
    }
}
