// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Lattice Authors

//! Append-only audit log (spec.md §4.5, §5 "Audit log is append-only;
//! writers never read").

use lattice_core::{AuditEntry, Event};
use lattice_eventbus::EventBus;
use parking_lot::Mutex;

/// Append-only sink for audit entries. The default in-process implementation
/// keeps everything in memory; a production deployment would swap this for
/// a write-ahead file or a table, behind the same trait.
pub trait AuditLog: Send + Sync {
    fn append(&self, entry: AuditEntry);
}

#[derive(Default)]
pub struct InMemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry recorded so far, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, entry: AuditEntry) {
        self.entries.lock().push(entry);
    }
}

/// Record an audit entry: persist it and publish it on `safety:audit`
/// (spec.md §4.5 "The entry is emitted on the event bus and persisted").
pub fn record(bus: &EventBus, log: &dyn AuditLog, entry: AuditEntry) {
    bus.publish(Event::AuditRecorded { entry: Box::new(entry.clone()) });
    log.append(entry);
}

#[cfg(test)]
#[path = "audit_log_tests.rs"]
mod tests;
