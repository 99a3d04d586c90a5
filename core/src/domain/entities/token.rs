//! Token claims carried inside signed bearer tokens.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Default token issuer
pub const DEFAULT_ISSUER: &str = "taskdeck";

/// Declared purpose of a token.
///
/// A token is only ever accepted for the purpose it was issued for: access
/// tokens authorize resource requests, refresh tokens obtain new access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Claim value written into `token_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "ACCESS",
            Self::Refresh => "REFRESH",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, unique per issued token
    pub jti: String,

    /// Token purpose
    pub token_type: TokenKind,

    /// Role names, present on access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeSet<String>>,
}

impl Claims {
    /// Creates claims for a token issued at `issued_at` that lives for `lifetime`.
    ///
    /// Roles are kept for access tokens and discarded for refresh tokens.
    /// An expiry beyond the representable range saturates.
    pub fn new(
        subject: impl Into<String>,
        kind: TokenKind,
        roles: Option<BTreeSet<String>>,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let expires_at = issued_at.checked_add_signed(lifetime).unwrap_or(
            if lifetime < Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            },
        );
        let roles = match kind {
            TokenKind::Access => Some(roles.unwrap_or_default()),
            TokenKind::Refresh => None,
        };

        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
            token_type: kind,
            roles,
        }
    }

    /// Whether the token was issued for `kind`
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.token_type == kind
    }

    /// Role names embedded in the token (empty for refresh tokens)
    pub fn roles(&self) -> BTreeSet<String> {
        self.roles.clone().unwrap_or_default()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }

    /// Checks if the claims have expired at `now`.
    ///
    /// A token stays valid through the whole second named by `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }

    /// Seconds left before expiry at `now`, never negative
    pub fn remaining_validity_at(&self, now: DateTime<Utc>) -> i64 {
        (self.exp - now.timestamp()).max(0)
    }
}

fn timestamp_to_datetime(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
