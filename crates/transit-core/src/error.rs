//! Error types shared across the Transit workspace.
//!
//! Organized by who sees them: [`EntityError`] for bad entity ids supplied
//! by a caller, [`StepError`] for per-entity faults a step isolates and
//! reports instead of aborting.

use thiserror::Error;

use crate::id::{CarId, VertexId};
use crate::log::EntityKind;

/// Lookup of an entity that does not exist (never spawned, or destroyed).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EntityError {
    /// No live entity of this kind has the given id.
    #[error("unknown {kind} #{id}")]
    UnknownEntity {
        /// Kind that was looked up.
        kind: EntityKind,
        /// The id that failed to resolve.
        id: u64,
    },
}

/// A fault confined to one entity during a step.
///
/// The step that produced it still ran to completion for every other
/// entity; the faulty entity keeps its state and is retried next step.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// The car's next hop is not reachable by an outgoing edge from the
    /// vertex it is parked at. The hop is left unconsumed.
    #[error("car #{car} is stuck at vertex {vertex}: no edge to next hop {next_hop}")]
    StuckCar {
        /// The stuck car.
        car: CarId,
        /// Vertex the car remains parked at.
        vertex: VertexId,
        /// The unreachable next hop.
        next_hop: VertexId,
    },
}

impl StepError {
    /// The car the fault is attributed to.
    pub fn car(&self) -> CarId {
        match self {
            Self::StuckCar { car, .. } => *car,
        }
    }
}
