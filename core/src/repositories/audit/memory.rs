//! Audit sink that keeps entries in memory, for tests and diagnostics.

use std::sync::Mutex;

use crate::domain::entities::audit::{AuditEntry, SecurityEvent};

use super::AuditSink;

/// Records every entry it receives
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Recorded event types, in order
    pub fn events(&self) -> Vec<SecurityEvent> {
        self.entries().into_iter().map(|entry| entry.event).collect()
    }

    /// How many entries of `event` were recorded
    pub fn count_of(&self, event: SecurityEvent) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.event == event)
            .count()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: &AuditEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_entries() {
        let sink = MemoryAuditSink::new();
        sink.record(&AuditEntry::new(SecurityEvent::LoginSuccess).with_subject("alice"));
        sink.record(&AuditEntry::new(SecurityEvent::LoginFailure));
        sink.record(&AuditEntry::new(SecurityEvent::LoginFailure));

        assert_eq!(sink.entries().len(), 3);
        assert_eq!(sink.count_of(SecurityEvent::LoginFailure), 2);
        assert_eq!(sink.events()[0], SecurityEvent::LoginSuccess);

        sink.clear();
        assert!(sink.entries().is_empty());
    }
}
