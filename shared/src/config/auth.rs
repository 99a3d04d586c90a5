//! Authentication configuration: token signing, lifetimes and revocation

use serde::{Deserialize, Serialize};

use super::env_or;

/// Secret used when nothing else is configured. Long enough for HS256, never
/// suitable outside development.
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production-0123456789";

/// Bearer token settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Whether bearer-token authentication is active. When false, login is
    /// refused and protected endpoints rely on the external fallback mode.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// HMAC signing secret, at least 32 bytes
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// `iss` claim written and required on every token
    pub issuer: String,

    /// Signing algorithm name; only the HMAC family is accepted
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            secret: String::from(DEVELOPMENT_SECRET),
            access_token_expiry: 15 * 60,
            refresh_token_expiry: 7 * 24 * 60 * 60,
            issuer: String::from("taskdeck"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Apply `JWT_ENABLED`, `JWT_SECRET`, `JWT_ACCESS_TOKEN_EXPIRY`,
    /// `JWT_REFRESH_TOKEN_EXPIRY` and `JWT_ISSUER` on top of this config
    pub fn overridden_from_env(self) -> Self {
        Self {
            enabled: env_or("JWT_ENABLED", self.enabled),
            secret: std::env::var("JWT_SECRET").unwrap_or(self.secret),
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", self.access_token_expiry),
            refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRY", self.refresh_token_expiry),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(self.issuer),
            algorithm: self.algorithm,
        }
    }

    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Revocation registry settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Seconds between background sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// How long to keep a revoked token whose expiry cannot be read
    #[serde(default = "default_fallback_retention")]
    pub fallback_retention_seconds: i64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: default_sweep_interval(),
            fallback_retention_seconds: default_fallback_retention(),
        }
    }
}

impl RevocationConfig {
    /// Apply `REVOCATION_SWEEP_INTERVAL` and `REVOCATION_FALLBACK_RETENTION`
    pub fn overridden_from_env(self) -> Self {
        Self {
            sweep_interval_seconds: env_or("REVOCATION_SWEEP_INTERVAL", self.sweep_interval_seconds),
            fallback_retention_seconds: env_or(
                "REVOCATION_FALLBACK_RETENTION",
                self.fallback_retention_seconds,
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    #[serde(default)]
    pub revocation: RevocationConfig,
}

impl AuthConfig {
    /// Defaults with every `JWT_*` and `REVOCATION_*` variable applied
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::default().overridden_from_env(),
            revocation: RevocationConfig::default().overridden_from_env(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_sweep_interval() -> u64 {
    60 * 60
}

fn default_fallback_retention() -> i64 {
    24 * 60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_defaults() {
        let config = JwtConfig::default();
        assert!(config.enabled);
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_using_default_secret());
        assert!(config.secret.len() >= 32);
    }

    #[test]
    fn test_custom_secret_is_not_default() {
        let config = JwtConfig::new("a-custom-secret").with_enabled(false);
        assert!(!config.enabled);
        assert!(!config.is_using_default_secret());
        assert_eq!(config.issuer, "taskdeck");
    }

    #[test]
    fn test_revocation_defaults() {
        let config = RevocationConfig::default();
        assert_eq!(config.sweep_interval_seconds, 3600);
        assert_eq!(config.fallback_retention_seconds, 86400);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AuthConfig = serde_json::from_str(
            r#"{"jwt":{"secret":"s","access_token_expiry":60,"refresh_token_expiry":120,"issuer":"t"}}"#,
        )
        .unwrap();
        assert!(config.jwt.enabled);
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.revocation.fallback_retention_seconds, 86400);
    }
}
