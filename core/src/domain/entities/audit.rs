//! Security audit entries for authentication and token events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How urgently an audit event deserves attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Routine events (issuance, expiry)
    Low,
    /// Failures that may be client bugs or probing
    Medium,
    /// Likely attacks (forged signatures, reuse of revoked tokens)
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event types recorded by the authentication core
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityEvent {
    // Login events
    LoginAttempt,
    LoginSuccess,
    LoginFailure,
    LoginWhileDisabled,

    // Token lifecycle events
    TokenIssued,
    TokenRefreshed,
    TokenRevoked,
    RefreshFailure,

    // Validation failures
    SignatureInvalid,
    TokenExpired,
    MalformedToken,
    UnsupportedToken,
    WrongTokenKind,
    RevokedTokenReuse,

    // Request gate events
    GateAuthenticated,
    TokenExpiringSoon,
    TokenFromQueryParam,
    GateRejection,

    // Registry maintenance
    RevocationListCleared,
    SweepCompleted,
}

impl SecurityEvent {
    /// Stable name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginAttempt => "LOGIN_ATTEMPT",
            Self::LoginSuccess => "LOGIN_SUCCESS",
            Self::LoginFailure => "LOGIN_FAILURE",
            Self::LoginWhileDisabled => "LOGIN_WHILE_DISABLED",
            Self::TokenIssued => "TOKEN_ISSUED",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::TokenRevoked => "TOKEN_REVOKED",
            Self::RefreshFailure => "REFRESH_FAILURE",
            Self::SignatureInvalid => "SIGNATURE_INVALID",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::UnsupportedToken => "UNSUPPORTED_TOKEN",
            Self::WrongTokenKind => "WRONG_TOKEN_KIND",
            Self::RevokedTokenReuse => "REVOKED_TOKEN_REUSE",
            Self::GateAuthenticated => "GATE_AUTHENTICATED",
            Self::TokenExpiringSoon => "TOKEN_EXPIRING_SOON",
            Self::TokenFromQueryParam => "TOKEN_FROM_QUERY_PARAM",
            Self::GateRejection => "GATE_REJECTION",
            Self::RevocationListCleared => "REVOCATION_LIST_CLEARED",
            Self::SweepCompleted => "SWEEP_COMPLETED",
        }
    }

    /// Severity assigned when the caller does not override it
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::LoginAttempt
            | Self::LoginSuccess
            | Self::TokenIssued
            | Self::TokenRefreshed
            | Self::TokenExpired
            | Self::GateAuthenticated
            | Self::TokenExpiringSoon
            | Self::RevocationListCleared
            | Self::SweepCompleted => Severity::Low,

            Self::LoginFailure
            | Self::LoginWhileDisabled
            | Self::TokenRevoked
            | Self::RefreshFailure
            | Self::MalformedToken
            | Self::UnsupportedToken
            | Self::WrongTokenKind
            | Self::TokenFromQueryParam
            | Self::GateRejection => Severity::Medium,

            Self::SignatureInvalid | Self::RevokedTokenReuse => Severity::High,
        }
    }
}

impl fmt::Display for SecurityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub event: SecurityEvent,
    pub severity: Severity,
    /// Username the event concerns, when known
    pub subject: Option<String>,
    /// Free-form context (client IP, token fingerprint, reason)
    pub details: BTreeMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates an entry with the event's default severity
    pub fn new(event: SecurityEvent) -> Self {
        Self {
            event,
            severity: event.default_severity(),
            subject: None,
            details: BTreeMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.details.insert(key.into(), value.to_string());
        self
    }

    /// Renders details as `key=value` pairs for log lines
    pub fn details_line(&self) -> String {
        self.details
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
