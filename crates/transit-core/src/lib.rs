//! Core types and traits for the Transit simulation workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the network, the engine, and drivers: typed ids,
//! caller-facing vertex references, error types, and the [`EventLog`]
//! collaborator trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod log;
pub mod vertex_ref;

pub use error::{EntityError, StepError};
pub use id::{CarId, EdgeKey, PassengerId, TickId, VertexId};
pub use log::{EntityKind, EventLog, TracingLog};
pub use vertex_ref::VertexRef;
