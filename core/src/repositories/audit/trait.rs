//! Audit sink trait defining where security events are written.

use crate::domain::entities::audit::AuditEntry;

/// Destination for security audit entries
///
/// Recording is synchronous and must not fail the caller: the request gate
/// records events on its hot path.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry);
}
