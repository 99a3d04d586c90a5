//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, lifetimes and revocation sweeping
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, RevocationConfig};
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in preset for `env`.
    ///
    /// Only development binds to loopback and accepts any CORS origin.
    pub fn for_environment(env: Environment) -> Self {
        let (server, cors) = if env.is_development() {
            (ServerConfig::new("127.0.0.1", 8080), CorsConfig::development())
        } else {
            (ServerConfig::default(), CorsConfig::default())
        };

        Self {
            environment: env,
            server,
            auth: AuthConfig::default(),
            cors,
            logging: LoggingConfig::for_environment(env),
        }
    }

    /// Preset for the detected environment with individual variables
    /// (`JWT_*`, `REVOCATION_*`, `SERVER_*`, `ALLOWED_ORIGINS`,
    /// `CORS_MAX_AGE`, `LOG_LEVEL`) applied on top.
    pub fn from_env() -> Self {
        let preset = Self::for_environment(Environment::from_env());

        Self {
            environment: preset.environment,
            server: preset.server.overridden_from_env(),
            auth: AuthConfig::from_env(),
            cors: preset.cors.overridden_from_env(),
            logging: LoggingConfig {
                level: std::env::var("LOG_LEVEL").unwrap_or(preset.logging.level),
            },
        }
    }
}

/// Read and parse an environment variable, falling back to `default`
/// when the variable is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
