//! Results of revocation, logout and introspection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened when a token was handed to the revocation registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RevocationOutcome {
    /// Recorded until the token's own expiry
    Revoked { expires_at: DateTime<Utc> },
    /// The token's expiry could not be read; recorded for the fallback window
    RevokedWithFallback { retain_until: DateTime<Utc> },
    /// The token had already expired, nothing to record
    AlreadyExpired,
    /// Blank input
    Ignored,
}

impl RevocationOutcome {
    /// Whether an entry now exists in the registry for the token
    pub fn is_recorded(&self) -> bool {
        matches!(
            self,
            Self::Revoked { .. } | Self::RevokedWithFallback { .. }
        )
    }
}

/// Result of one registry sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Entries removed because their expiry had passed
    pub removed: usize,
    /// Entries left in the registry afterwards
    pub remaining: usize,
}

/// Per-token outcome of a logout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutSummary {
    pub access: RevocationOutcome,
    /// `None` when no refresh token was supplied
    pub refresh: Option<RevocationOutcome>,
}

/// Non-mutating status of a presented access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introspection {
    pub valid: bool,
    pub subject: Option<String>,
    pub remaining_validity_seconds: Option<i64>,
}

impl Introspection {
    pub fn active(subject: impl Into<String>, remaining_validity_seconds: i64) -> Self {
        Self {
            valid: true,
            subject: Some(subject.into()),
            remaining_validity_seconds: Some(remaining_validity_seconds),
        }
    }

    pub fn inactive() -> Self {
        Self {
            valid: false,
            subject: None,
            remaining_validity_seconds: None,
        }
    }
}
