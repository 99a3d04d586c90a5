//! Configuration for the token codec

use chrono::Duration;
use jsonwebtoken::Algorithm;
use std::str::FromStr;

use td_shared::config::auth::{JwtConfig, DEVELOPMENT_SECRET};

use crate::domain::entities::token::DEFAULT_ISSUER;
use crate::errors::DomainError;

/// Minimum signing secret length in bytes (HMAC-SHA256 key strength)
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest lifetime accepted for either token kind: ten years
pub const MAX_LIFETIME_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// JWT signing secret
    pub secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Value written to and required in `iss`
    pub issuer: String,
    /// Lifetime of access tokens
    pub access_lifetime: Duration,
    /// Lifetime of refresh tokens
    pub refresh_lifetime: Duration,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self {
            secret: DEVELOPMENT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
            access_lifetime: Duration::minutes(15),
            refresh_lifetime: Duration::days(7),
        }
    }
}

impl TokenCodecConfig {
    /// Create a configuration with the given secret and default lifetimes
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_lifetimes(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_lifetime = access;
        self.refresh_lifetime = refresh;
        self
    }

    /// Build from the shared JWT configuration
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm =
            Algorithm::from_str(&config.algorithm).map_err(|_| DomainError::Validation {
                message: format!("unknown JWT algorithm '{}'", config.algorithm),
            })?;

        Ok(Self {
            secret: config.secret.clone(),
            algorithm,
            issuer: config.issuer.clone(),
            access_lifetime: lifetime_from_seconds("access", config.access_token_expiry)?,
            refresh_lifetime: lifetime_from_seconds("refresh", config.refresh_token_expiry)?,
        })
    }

    /// Check the configuration before any key is built
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::Validation {
                message: format!(
                    "JWT secret must be at least {} bytes, got {}",
                    MIN_SECRET_BYTES,
                    self.secret.len()
                ),
            });
        }

        if !matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Validation {
                message: format!("unsupported JWT algorithm {:?}", self.algorithm),
            });
        }

        check_lifetime("access", self.access_lifetime)?;
        check_lifetime("refresh", self.refresh_lifetime)?;

        Ok(())
    }

    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

fn lifetime_from_seconds(kind: &str, seconds: i64) -> Result<Duration, DomainError> {
    let lifetime = Duration::try_seconds(seconds).ok_or_else(|| DomainError::Validation {
        message: format!("{} token lifetime of {}s is out of range", kind, seconds),
    })?;
    check_lifetime(kind, lifetime)?;
    Ok(lifetime)
}

/// Lifetimes must lie in `1..=MAX_LIFETIME_SECONDS`
fn check_lifetime(kind: &str, lifetime: Duration) -> Result<(), DomainError> {
    if lifetime <= Duration::zero() || lifetime.num_seconds() > MAX_LIFETIME_SECONDS {
        return Err(DomainError::Validation {
            message: format!(
                "{} token lifetime must be between 1 and {} seconds, got {}",
                kind,
                MAX_LIFETIME_SECONDS,
                lifetime.num_seconds()
            ),
        });
    }
    Ok(())
}
