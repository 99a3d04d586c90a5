//! Authenticated identities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::token::Claims;

/// Prefix applied to role names when they are exposed as authorities
pub const ROLE_PREFIX: &str = "ROLE_";

/// Identity returned by the credential collaborator after a successful check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
    pub roles: BTreeSet<String>,
}

impl UserIdentity {
    pub fn new<I, S>(username: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// The identity and role set bound to a single request after its access
/// token passed signature, kind and revocation checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Username taken from the token subject
    pub username: String,

    /// Role names embedded in the access token
    pub roles: BTreeSet<String>,

    /// JWT ID of the token that authenticated the request
    pub token_id: String,

    /// Expiry of that token
    pub expires_at: DateTime<Utc>,
}

impl Principal {
    /// Builds a principal from verified access-token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            username: claims.sub.clone(),
            roles: claims.roles(),
            token_id: claims.jti.clone(),
            expires_at: claims.expires_at(),
        }
    }

    /// Seconds until the token expires, zero once it has
    pub fn remaining_validity_at(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at.timestamp() - now.timestamp()).max(0)
    }

    /// Checks a role by bare name (`ADMIN`) or authority name (`ROLE_ADMIN`)
    pub fn has_role(&self, role: &str) -> bool {
        let bare = role.strip_prefix(ROLE_PREFIX).unwrap_or(role);
        self.roles.contains(bare)
    }

    /// Role names in authority form, e.g. `ROLE_USER`
    pub fn authorities(&self) -> Vec<String> {
        self.roles
            .iter()
            .map(|role| format!("{}{}", ROLE_PREFIX, role))
            .collect()
    }
}
