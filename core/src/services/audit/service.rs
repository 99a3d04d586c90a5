//! Audit service for recording authentication and token security events.
//!
//! The service is a thin, cloneable front for an [`AuditSink`]. Token
//! material never reaches the sink; callers pass a short fingerprint instead.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::domain::entities::audit::{AuditEntry, SecurityEvent};
use crate::errors::TokenError;
use crate::repositories::{AuditSink, TracingAuditSink};

/// Service that stamps and forwards security events
#[derive(Clone)]
pub struct AuditService {
    sink: Arc<dyn AuditSink>,
}

impl AuditService {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Audit service writing to the `security_audit` log target
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingAuditSink::new()))
    }

    pub fn record(&self, entry: AuditEntry) {
        self.sink.record(&entry);
    }

    /// Record `event` with its default severity
    pub fn event(&self, event: SecurityEvent, subject: Option<&str>) {
        let mut entry = AuditEntry::new(event);
        if let Some(subject) = subject {
            entry = entry.with_subject(subject);
        }
        self.record(entry);
    }

    /// Record a token validation failure at the severity the error carries
    pub fn token_failure(&self, error: &TokenError, subject: Option<&str>, context: &str) {
        let mut entry = AuditEntry::new(error.event())
            .with_severity(error.severity())
            .with_detail("code", error.code())
            .with_detail("context", context);
        if let Some(subject) = subject {
            entry = entry.with_subject(subject);
        }
        self.record(entry);
    }
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService").finish_non_exhaustive()
    }
}

/// Short, non-reversible token identifier for log lines
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(&digest[..6])
}
