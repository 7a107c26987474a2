//! Step engine for Transit simulations.
//!
//! Provides [`SimulationEngine`], which moves cars along their routes and
//! transfers passengers between cars and stations one tick at a time.
//!
//! # Architecture
//!
//! - [`EntityRegistry`] owns cars and passengers and allocates their ids.
//! - [`MovementScheduler`] runs the two-phase lockstep car movement.
//! - [`TransferCoordinator`] ejects, completes, and boards passengers.
//! - [`SimulationEngine`] ties them together behind spawn, step, transfer,
//!   and statistics operations.
//!
//! Queues live in the [`Network`](transit_net::Network); the schedulers
//! borrow it for the duration of one pass and hold nothing afterwards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod metrics;
pub mod movement;
pub mod plan;
pub mod registry;
pub mod stats;
pub mod transfer;

pub use config::{ConfigError, EngineConfig, Placement, DEFAULT_CAR_CAPACITY};
pub use engine::{SimulationEngine, StepResult};
pub use entity::{Car, CarOptions, CarPosition, Passenger, PassengerPosition};
pub use error::EngineError;
pub use metrics::StepMetrics;
pub use movement::{ArrivedCar, MovementOutcome, MovementScheduler};
pub use plan::RoutePlan;
pub use registry::{EntityCounters, EntityRegistry};
pub use stats::{StatsKind, StatsTable};
pub use transfer::{TransferCoordinator, TransferOutcome};

use transit_core::VertexId;
use transit_net::Network;

/// `"{index}: {name}"` as used in event messages. Unnamed vertices leave
/// the name empty.
pub(crate) fn place(net: &Network, v: VertexId) -> String {
    format!("{v}: {}", net.name_of(v).unwrap_or_default())
}
