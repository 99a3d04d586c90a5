//! Authentication response value object returned by login and refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::entities::token::Claims;

/// Token type reported to clients
pub const BEARER: &str = "Bearer";

/// Authentication response containing the token pair and session metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Always `Bearer`
    pub token_type: String,

    pub username: String,

    /// Role names embedded in the access token
    pub roles: BTreeSet<String>,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    pub issued_at: DateTime<Utc>,

    /// Access token expiry
    pub expires_at: DateTime<Utc>,
}

impl AuthResponse {
    /// Builds a response from a freshly issued access token and the refresh
    /// token to hand back alongside it.
    pub fn from_access_claims(
        access_token: String,
        refresh_token: String,
        claims: &Claims,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: BEARER.to_string(),
            username: claims.sub.clone(),
            roles: claims.roles(),
            expires_in: claims.exp - claims.iat,
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
        }
    }
}
