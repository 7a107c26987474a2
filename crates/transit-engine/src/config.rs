//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is the input for constructing a
//! [`SimulationEngine`](crate::engine::SimulationEngine).
//! [`validate()`](EngineConfig::validate) checks structural invariants
//! before anything is built; initial placements that fail later, for
//! example because no route exists, surface as
//! [`ConfigError::Placement`] from the constructor.

use std::fmt;

use thiserror::Error;
use transit_core::{EventLog, VertexRef};
use transit_net::Network;

use crate::entity::CarOptions;
use crate::error::EngineError;
use crate::plan::RoutePlan;

/// Passenger capacity for cars spawned without an explicit one.
pub const DEFAULT_CAR_CAPACITY: usize = 20;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating an [`EngineConfig`] or applying its
/// initial placements.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No event log was supplied.
    #[error("an event log is required")]
    MissingEventLog,
    /// The network has no vertices.
    #[error("network has no vertices")]
    EmptyNetwork,
    /// An initial placement could not be applied.
    #[error("invalid initial placement: {0}")]
    Placement(#[source] EngineError),
}

// ── Placement ──────────────────────────────────────────────────────

/// Initial occupancy applied when the engine is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Passengers waiting at a vertex.
    Passengers {
        /// Where they wait.
        at: VertexRef,
        /// How each one's route is chosen.
        plan: RoutePlan,
        /// How many to spawn.
        amount: u32,
    },
    /// Cars parked at a vertex.
    Cars {
        /// Where they park.
        at: VertexRef,
        /// Passenger capacity of each car.
        capacity: usize,
        /// How each one's route is chosen.
        plan: RoutePlan,
        /// Behaviour switches.
        options: CarOptions,
        /// How many to spawn.
        amount: u32,
    },
    /// A car already travelling along an edge. Its route is planned from
    /// the edge target.
    InTransit {
        /// Edge source.
        from: VertexRef,
        /// Edge target.
        to: VertexRef,
        /// Passenger capacity.
        capacity: usize,
        /// How the route onward from `to` is chosen.
        plan: RoutePlan,
        /// Behaviour switches.
        options: CarOptions,
    },
}

impl Placement {
    /// Vertex references this placement names directly.
    fn references(&self) -> Vec<&VertexRef> {
        match self {
            Self::Passengers { at, .. } | Self::Cars { at, .. } => vec![at],
            Self::InTransit { from, to, .. } => vec![from, to],
        }
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing a simulation engine.
pub struct EngineConfig {
    /// The station network. Moved into the engine.
    pub network: Network,
    /// Sink for entity events. Required.
    pub event_log: Option<Box<dyn EventLog>>,
    /// Seed for random destination choice.
    pub seed: u64,
    /// Entities present before the first step, applied in order.
    pub occupancy: Vec<Placement>,
}

impl EngineConfig {
    /// A configuration over `network` with no log, seed 0, and no
    /// initial occupancy.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            event_log: None,
            seed: 0,
            occupancy: Vec::new(),
        }
    }

    /// Set the event log.
    pub fn with_event_log(mut self, log: impl EventLog + 'static) -> Self {
        self.event_log = Some(Box::new(log));
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Append an initial placement.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.occupancy.push(placement);
        self
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Somewhere to send events.
        if self.event_log.is_none() {
            return Err(ConfigError::MissingEventLog);
        }
        // 2. At least one vertex.
        if self.network.vertex_count() == 0 {
            return Err(ConfigError::EmptyNetwork);
        }
        // 3. Placements name existing vertices and edges.
        for placement in &self.occupancy {
            let ids = self
                .network
                .resolve_all(placement.references())
                .map_err(|e| ConfigError::Placement(e.into()))?;
            if let (Placement::InTransit { .. }, &[from, to]) = (placement, ids.as_slice()) {
                if !self.network.has_edge(from, to) {
                    return Err(ConfigError::Placement(EngineError::NoSuchEdge { from, to }));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("vertices", &self.network.vertex_count())
            .field("edges", &self.network.edge_count())
            .field("event_log", &self.event_log.is_some())
            .field("seed", &self.seed)
            .field("occupancy", &self.occupancy)
            .finish()
    }
}
