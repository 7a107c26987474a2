//! The station network: vertices, weighted directed edges, and their queues.

use std::collections::VecDeque;
use std::ops::Add;

use indexmap::IndexMap;
use pathfinding::num_traits::Zero;
use pathfinding::prelude::dijkstra;
use smallvec::SmallVec;
use transit_core::{CarId, EdgeKey, PassengerId, VertexId, VertexRef};

use crate::error::NetError;
use crate::route::Route;

/// Weight given to edges when the caller does not specify one.
pub const DEFAULT_WEIGHT: u32 = 1;

/// A station.
///
/// Owns two FIFO queues: passengers waiting here, and cars parked here.
#[derive(Clone, Debug, Default)]
pub struct Vertex {
    name: Option<String>,
    waiting: VecDeque<PassengerId>,
    parked: VecDeque<CarId>,
}

impl Vertex {
    /// Unique name, if the vertex was given one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Passengers waiting at this vertex, in arrival order.
    pub fn waiting(&self) -> &VecDeque<PassengerId> {
        &self.waiting
    }

    /// Cars parked at this vertex, in arrival order.
    pub fn parked(&self) -> &VecDeque<CarId> {
        &self.parked
    }
}

/// A directed, weighted connection between two vertices.
#[derive(Clone, Debug)]
pub struct Edge {
    key: EdgeKey,
    weight: u32,
    transit: VecDeque<CarId>,
}

impl Edge {
    /// The `(source, target)` pair identifying this edge.
    pub fn key(&self) -> EdgeKey {
        self.key
    }

    /// Routing weight. Always positive.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Cars travelling along this edge, in departure order.
    pub fn transit(&self) -> &VecDeque<CarId> {
        &self.transit
    }
}

/// Directed station graph with per-vertex and per-edge queues.
///
/// Vertices are indexed densely from 0 in insertion order and are never
/// removed. Edges iterate in creation order and a vertex's outgoing
/// neighbours are listed in the order their edges were added; both orders
/// are part of the simulation's determinism contract.
///
/// The network owns every queue. The movement and transfer passes mutate
/// them through the `_mut` accessors and keep no references across calls.
///
/// # Examples
///
/// ```
/// use transit_core::VertexRef;
/// use transit_net::Network;
///
/// let mut net = Network::new();
/// let a = net.add_vertex(Some("A")).unwrap();
/// let b = net.add_vertex(Some("B")).unwrap();
/// let c = net.add_vertex(None).unwrap();
/// net.add_road(a, b, 1).unwrap();
/// net.add_road(b, c, 1).unwrap();
///
/// assert_eq!(net.resolve(&VertexRef::from("B")).unwrap(), b);
/// assert_eq!(net.route(a, c).unwrap().to_vec(), vec![a, b, c]);
/// assert_eq!(net.label(c), "2");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Network {
    vertices: Vec<Vertex>,
    names: IndexMap<String, VertexId>,
    edges: IndexMap<EdgeKey, Edge>,
    out: Vec<SmallVec<[VertexId; 8]>>,
}

impl Network {
    /// An empty network.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ────────────────────────────────────────────

    /// Add a vertex, optionally named, and return its index.
    ///
    /// Returns `Err(NetError::DuplicateName)` if another vertex already
    /// carries `name`.
    pub fn add_vertex(&mut self, name: Option<&str>) -> Result<VertexId, NetError> {
        let id = VertexId(self.vertices.len() as u32);
        if let Some(name) = name {
            if self.names.contains_key(name) {
                return Err(NetError::DuplicateName {
                    name: name.to_string(),
                });
            }
            self.names.insert(name.to_string(), id);
        }
        self.vertices.push(Vertex {
            name: name.map(str::to_string),
            ..Vertex::default()
        });
        self.out.push(SmallVec::new());
        Ok(id)
    }

    /// Add the directed edge `from → to` with the given weight.
    ///
    /// Fails with `UnknownVertex` if either endpoint does not exist,
    /// `InvalidWeight` if `weight` is zero, and `DuplicateEdge` if the
    /// ordered pair is already connected.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: u32,
    ) -> Result<EdgeKey, NetError> {
        self.check(from)?;
        self.check(to)?;
        if weight == 0 {
            return Err(NetError::InvalidWeight { from, to });
        }
        let key = EdgeKey::new(from, to);
        if self.edges.contains_key(&key) {
            return Err(NetError::DuplicateEdge { from, to });
        }
        self.edges.insert(
            key,
            Edge {
                key,
                weight,
                transit: VecDeque::new(),
            },
        );
        self.out[from.index()].push(to);
        Ok(key)
    }

    /// Add edges in both directions between `a` and `b`.
    ///
    /// Nothing is added if either direction would fail.
    pub fn add_road(
        &mut self,
        a: VertexId,
        b: VertexId,
        weight: u32,
    ) -> Result<(EdgeKey, EdgeKey), NetError> {
        self.check(a)?;
        self.check(b)?;
        if weight == 0 {
            return Err(NetError::InvalidWeight { from: a, to: b });
        }
        if self.has_edge(b, a) {
            return Err(NetError::DuplicateEdge { from: b, to: a });
        }
        let forward = self.add_edge(a, b, weight)?;
        let backward = self.add_edge(b, a, weight)?;
        Ok((forward, backward))
    }

    // ── Lookup ──────────────────────────────────────────────────

    /// Resolve a caller-facing reference to a vertex index.
    ///
    /// Indices resolve when in range; names resolve through the name table.
    pub fn resolve(&self, reference: &VertexRef) -> Result<VertexId, NetError> {
        let found = match reference {
            VertexRef::Index(i) => Some(VertexId(*i)).filter(|v| v.index() < self.vertices.len()),
            VertexRef::Name(name) => self.names.get(name.as_str()).copied(),
        };
        found.ok_or_else(|| NetError::UnknownVertex {
            reference: reference.clone(),
        })
    }

    /// Resolve every reference, failing on the first unknown one.
    pub fn resolve_all<'a, I>(&self, references: I) -> Result<Vec<VertexId>, NetError>
    where
        I: IntoIterator<Item = &'a VertexRef>,
    {
        references.into_iter().map(|r| self.resolve(r)).collect()
    }

    /// Whether `v` names a vertex of this network.
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.vertices.len()
    }

    fn check(&self, v: VertexId) -> Result<(), NetError> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(NetError::UnknownVertex {
                reference: VertexRef::from(v),
            })
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertex indices in index order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len() as u32).map(VertexId)
    }

    /// Edge keys in creation order.
    pub fn edge_keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges.keys().copied()
    }

    /// The vertex's name, if it has one.
    pub fn name_of(&self, v: VertexId) -> Option<&str> {
        self.vertices.get(v.index()).and_then(Vertex::name)
    }

    /// The vertex's name, or its index when unnamed.
    pub fn label(&self, v: VertexId) -> String {
        match self.name_of(v) {
            Some(name) => name.to_string(),
            None => v.to_string(),
        }
    }

    // ── Topology ────────────────────────────────────────────────

    /// Outgoing neighbours of `v` in edge-creation order.
    ///
    /// Empty for an unknown vertex.
    pub fn neighbours(&self, v: VertexId) -> &[VertexId] {
        self.out.get(v.index()).map(|n| n.as_slice()).unwrap_or(&[])
    }

    /// Whether the directed edge `from → to` exists.
    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.edges.contains_key(&EdgeKey::new(from, to))
    }

    /// Weight of the edge `from → to`, if it exists.
    pub fn weight(&self, from: VertexId, to: VertexId) -> Option<u32> {
        self.edges.get(&EdgeKey::new(from, to)).map(Edge::weight)
    }

    /// Shortest route from `from` to `to` by cumulative edge weight.
    ///
    /// The route includes both endpoints; `from == to` yields `[from]`.
    /// Among equal-cost routes the one discovered first wins, where
    /// discovery follows edge-creation order. Returns
    /// `Err(NetError::RouteNotFound)` if `to` is unreachable.
    pub fn route(&self, from: VertexId, to: VertexId) -> Result<Route, NetError> {
        self.check(from)?;
        self.check(to)?;
        let mut seq = 0u64;
        let successors = |v: &VertexId| -> Vec<(VertexId, RouteCost)> {
            let v = *v;
            self.neighbours(v)
                .iter()
                .filter_map(|&n| {
                    let w = self.weight(v, n)?;
                    seq += 1;
                    Some((n, RouteCost { dist: u64::from(w), seq }))
                })
                .collect()
        };
        dijkstra(&from, successors, |v| *v == to)
            .map(|(path, _cost)| Route::from(path))
            .ok_or(NetError::RouteNotFound { from, to })
    }

    /// Total weight of consecutive hops in `route`; `None` if any step has no edge.
    pub fn route_cost(&self, route: &Route) -> Option<u64> {
        let hops = route.to_vec();
        hops.windows(2)
            .map(|pair| self.weight(pair[0], pair[1]).map(u64::from))
            .sum()
    }

    // ── Queues ──────────────────────────────────────────────────

    /// The vertex, if it exists.
    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(v.index())
    }

    /// The edge `key`, if it exists.
    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(&key)
    }

    /// Passengers waiting at `v`.
    pub fn waiting(&self, v: VertexId) -> Option<&VecDeque<PassengerId>> {
        self.vertices.get(v.index()).map(|x| &x.waiting)
    }

    /// Mutable waiting queue at `v`.
    pub fn waiting_mut(&mut self, v: VertexId) -> Option<&mut VecDeque<PassengerId>> {
        self.vertices.get_mut(v.index()).map(|x| &mut x.waiting)
    }

    /// Cars parked at `v`.
    pub fn parked(&self, v: VertexId) -> Option<&VecDeque<CarId>> {
        self.vertices.get(v.index()).map(|x| &x.parked)
    }

    /// Mutable parked queue at `v`.
    pub fn parked_mut(&mut self, v: VertexId) -> Option<&mut VecDeque<CarId>> {
        self.vertices.get_mut(v.index()).map(|x| &mut x.parked)
    }

    /// Cars in transit on `key`.
    pub fn transit(&self, key: EdgeKey) -> Option<&VecDeque<CarId>> {
        self.edges.get(&key).map(|e| &e.transit)
    }

    /// Mutable transit queue on `key`.
    pub fn transit_mut(&mut self, key: EdgeKey) -> Option<&mut VecDeque<CarId>> {
        self.edges.get_mut(&key).map(|e| &mut e.transit)
    }
}

// ── Route cost ──────────────────────────────────────────────────

/// Path cost ordered by distance, then by when the last hop was relaxed.
///
/// The search heap compares whole costs, so equal distances pop in
/// discovery order and a later relaxation never displaces an earlier one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RouteCost {
    dist: u64,
    seq: u64,
}

impl Add for RouteCost {
    type Output = Self;

    fn add(self, hop: Self) -> Self {
        Self {
            dist: self.dist + hop.dist,
            seq: hop.seq,
        }
    }
}

impl Zero for RouteCost {
    fn zero() -> Self {
        Self { dist: 0, seq: 0 }
    }

    fn is_zero(&self) -> bool {
        self.dist == 0 && self.seq == 0
    }
}
