//! The event-log collaborator.
//!
//! The engine reports every entity-level event (spawn, move, board, eject,
//! arrival, stuck) to an [`EventLog`]. The log is append-only and keyed by
//! entity kind and id; where the records end up (a database, a file,
//! memory, `tracing`) is the implementor's business.

use std::fmt;

/// Kind of entity an event is recorded against.
///
/// Each kind renders as a fixed three-character tag for log keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Engine-level events not tied to a car or passenger.
    System,
    /// A car.
    Car,
    /// A passenger.
    Passenger,
}

impl EntityKind {
    /// Three-character tag used as the log key.
    pub fn tag(self) -> &'static str {
        match self {
            Self::System => "sys",
            Self::Car => "car",
            Self::Passenger => "pgr",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Append-only sink for simulation events.
///
/// Takes `&self` so sinks can be shared with observers (for example a test
/// that keeps a handle to inspect records). Implementations that buffer
/// must provide their own interior mutability.
pub trait EventLog: Send {
    /// Record `message` against the entity `(kind, id)`.
    fn log(&self, message: &str, kind: EntityKind, id: u64);
}

impl<T: EventLog + Sync> EventLog for std::sync::Arc<T> {
    fn log(&self, message: &str, kind: EntityKind, id: u64) {
        (**self).log(message, kind, id);
    }
}

/// [`EventLog`] that forwards every event to `tracing` at `INFO` level.
///
/// Useful for drivers that want events in their regular log output rather
/// than in a dedicated store.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl EventLog for TracingLog {
    fn log(&self, message: &str, kind: EntityKind, id: u64) {
        tracing::info!(target: "transit::events", kind = kind.tag(), id, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn tags_are_three_characters() {
        for kind in [EntityKind::System, EntityKind::Car, EntityKind::Passenger] {
            assert_eq!(kind.tag().len(), 3, "tag for {kind:?}");
        }
    }

    #[test]
    fn display_uses_tag() {
        assert_eq!(EntityKind::Passenger.to_string(), "pgr");
        assert_eq!(EntityKind::Car.to_string(), "car");
    }

    struct Counting(Mutex<usize>);

    impl EventLog for Counting {
        fn log(&self, _message: &str, _kind: EntityKind, _id: u64) {
            *self.0.lock().unwrap() += 1;
        }
    }

    #[test]
    fn arc_forwards_to_inner_log() {
        let inner = Arc::new(Counting(Mutex::new(0)));
        let shared: Box<dyn EventLog> = Box::new(Arc::clone(&inner));
        shared.log("a", EntityKind::Car, 1);
        shared.log("b", EntityKind::Passenger, 2);
        assert_eq!(*inner.0.lock().unwrap(), 2);
    }

    #[test]
    fn tracing_log_accepts_events_without_subscriber() {
        TracingLog.log("created", EntityKind::Car, 0);
    }
}
