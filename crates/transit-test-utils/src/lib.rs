//! Test utilities for Transit development.
//!
//! Provides [`MemoryLog`], an [`EventLog`] that keeps every record in memory
//! for later inspection, and [`fixtures`] with small reference networks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex, MutexGuard};

use transit_core::{EntityKind, EventLog};

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub message: String,
    pub kind: EntityKind,
    pub id: u64,
}

/// In-memory [`EventLog`].
///
/// Clones share the same buffer, so a test can hand one clone to the
/// engine and keep another to read records back.
#[derive(Clone, Debug, Default)]
pub struct MemoryLog {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of every record so far, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Messages recorded against one entity, oldest first.
    pub fn messages_for(&self, kind: EntityKind, id: u64) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.kind == kind && r.id == id)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Whether `message` was recorded against `(kind, id)`.
    pub fn contains(&self, kind: EntityKind, id: u64, message: &str) -> bool {
        self.lock()
            .iter()
            .any(|r| r.kind == kind && r.id == id && r.message == message)
    }

    /// Number of records whose message starts with `prefix`.
    pub fn count_prefix(&self, kind: EntityKind, prefix: &str) -> usize {
        self.lock()
            .iter()
            .filter(|r| r.kind == kind && r.message.starts_with(prefix))
            .count()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl EventLog for MemoryLog {
    fn log(&self, message: &str, kind: EntityKind, id: u64) {
        self.lock().push(LogRecord {
            message: message.to_string(),
            kind,
            id,
        });
    }
}
