//! Audit sink that writes entries as structured log events.

use tracing::{error, info, warn};

use crate::domain::entities::audit::{AuditEntry, Severity};

use super::AuditSink;

/// Log target for every audit line
pub const AUDIT_TARGET: &str = "security_audit";

/// Writes audit entries to the `security_audit` target.
///
/// LOW entries log at info, MEDIUM at warn and HIGH at error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: &AuditEntry) {
        let subject = entry.subject.as_deref().unwrap_or("unknown");
        let details = entry.details_line();

        match entry.severity {
            Severity::Low => info!(
                target: AUDIT_TARGET,
                event = entry.event.as_str(),
                severity = entry.severity.as_str(),
                subject,
                "{} {}",
                entry.event,
                details
            ),
            Severity::Medium => warn!(
                target: AUDIT_TARGET,
                event = entry.event.as_str(),
                severity = entry.severity.as_str(),
                subject,
                "{} {}",
                entry.event,
                details
            ),
            Severity::High => error!(
                target: AUDIT_TARGET,
                event = entry.event.as_str(),
                severity = entry.severity.as_str(),
                subject,
                "{} {}",
                entry.event,
                details
            ),
        }
    }
}
