//! Configuration for the session issuer

use td_shared::config::AuthConfig;

/// Configuration for the session issuer
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// When false, login and refresh are refused and the request gate
    /// leaves authentication to the fallback mode.
    pub enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl From<&AuthConfig> for SessionConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            enabled: config.jwt.enabled,
        }
    }
}
