//! Station network topology for Transit simulations.
//!
//! A [`Network`] is a directed graph of vertices (stations) joined by
//! positively weighted edges. Besides topology it owns the simulation's
//! queues: passengers waiting and cars parked at each vertex, and cars in
//! transit on each edge.
//!
//! # Routing
//!
//! [`Network::route`] computes the minimum-weight [`Route`] between two
//! vertices with Dijkstra's algorithm. Vertices at equal distance are
//! expanded in the order they were discovered, which follows edge-creation
//! order, so identical networks always yield identical routes.
//!
//! # Construction
//!
//! [`NetworkBuilder`] accepts vertex names and edge lists by
//! [`VertexRef`](transit_core::VertexRef) and validates eagerly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod network;
pub mod route;

pub use builder::NetworkBuilder;
pub use error::NetError;
pub use network::{Edge, Network, Vertex, DEFAULT_WEIGHT};
pub use route::Route;
