//! Transit: a discrete-time simulation of cars carrying passengers across a
//! weighted station network.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Transit sub-crates. For most users, adding `transit` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use transit::prelude::*;
//!
//! let network = NetworkBuilder::new()
//!     .vertices(["A", "B", "C"])
//!     .line(["A", "B", "C"])
//!     .build()
//!     .unwrap();
//! let config = EngineConfig::new(network)
//!     .with_event_log(TracingLog)
//!     .with_seed(7);
//! let mut engine = SimulationEngine::new(config).unwrap();
//!
//! engine.spawn_car("A", 4, RoutePlan::to("C"), CarOptions::default()).unwrap();
//! let rider = engine.spawn_passenger("A", RoutePlan::to("C")).unwrap();
//! engine.transfer(None).unwrap();
//!
//! for _ in 0..4 {
//!     let result = engine.step();
//!     assert!(result.errors.is_empty());
//! }
//! assert!(engine.passenger(rider).is_err());
//! assert_eq!(engine.current_tick(), TickId(4));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `transit-core` | IDs, vertex references, event log, step errors |
//! | [`net`] | `transit-net` | Network graph, builder, shortest routes |
//! | [`engine`] | `transit-engine` | Entities, movement, transfer, the step engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and the event log (`transit-core`).
///
/// Contains [`types::VertexId`], [`types::CarId`], [`types::PassengerId`],
/// [`types::VertexRef`], and the [`types::EventLog`] trait.
pub use transit_core as types;

/// Station network and routing (`transit-net`).
///
/// Build a [`net::Network`] directly or through [`net::NetworkBuilder`],
/// and query shortest [`net::Route`]s.
pub use transit_net as net;

/// The step engine (`transit-engine`).
///
/// [`engine::SimulationEngine`] spawns cars and passengers, runs lockstep
/// steps, and reports statistics.
pub use transit_engine as engine;

/// Common imports for typical Transit usage.
///
/// ```rust
/// use transit::prelude::*;
/// ```
///
/// This imports the network builder, the engine and its configuration,
/// route plans, identifiers, and the error types.
pub mod prelude {
    // Core types
    pub use transit_core::{
        CarId, EdgeKey, EntityKind, EventLog, PassengerId, TickId, TracingLog, VertexId, VertexRef,
    };

    // Network
    pub use transit_net::{Network, NetworkBuilder, Route};

    // Errors
    pub use transit_core::{EntityError, StepError};
    pub use transit_engine::{ConfigError, EngineError};
    pub use transit_net::NetError;

    // Engine
    pub use transit_engine::{
        CarOptions, CarPosition, EngineConfig, PassengerPosition, Placement, RoutePlan,
        SimulationEngine, StatsKind, StatsTable, StepMetrics, StepResult,
    };
}
