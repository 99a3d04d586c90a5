//! Server configuration loading
//!
//! Values come from the environment (`.env` included) first, then an
//! optional `config.<environment>` file next to the binary overrides them.

use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use td_shared::{AppConfig, Environment};

/// Users seeded into the in-memory directory when `SEED_USERS` is unset
/// outside production. Format: `user:secret:ROLE|ROLE,...`
pub const DEVELOPMENT_SEED_USERS: &str = "admin:admin-password:USER|ADMIN,user:user-password:USER";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    /// Seed list for the in-memory user directory
    pub seed_users: String,
}

impl Config {
    /// Load configuration from the environment and the optional
    /// per-environment file
    pub fn load() -> Result<Self, ConfigError> {
        let app = Self::layered(AppConfig::from_env())?;
        let seed_users = env::var("SEED_USERS").unwrap_or_else(|_| {
            if app.environment.is_production() {
                String::new()
            } else {
                String::from(DEVELOPMENT_SEED_USERS)
            }
        });

        Ok(Self { app, seed_users })
    }

    /// Overlay `config.<environment>.{toml,json,yaml}` on top of `base`
    pub fn layered(base: AppConfig) -> Result<AppConfig, ConfigError> {
        let file_name = base.environment.config_file();

        config::Config::builder()
            .add_source(config::Config::try_from(&base)?)
            .add_source(config::File::with_name(&file_name).required(false))
            .build()?
            .try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.app.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.app.environment.is_production()
    }

    pub fn jwt_enabled(&self) -> bool {
        self.app.auth.jwt.enabled
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.app.auth.revocation.sweep_interval_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layered_without_file_keeps_base() {
        let base = AppConfig::for_environment(Environment::Development);
        let loaded = Config::layered(base.clone()).unwrap();

        assert_eq!(loaded.server.port, base.server.port);
        assert_eq!(loaded.auth.jwt.secret, base.auth.jwt.secret);
        assert_eq!(
            loaded.auth.revocation.fallback_retention_seconds,
            base.auth.revocation.fallback_retention_seconds
        );
        assert!(loaded.environment.is_development());
    }

    #[test]
    fn test_sweep_interval() {
        let config = Config {
            app: AppConfig::for_environment(Environment::Development),
            seed_users: String::new(),
        };
        assert_eq!(config.sweep_interval().as_secs(), 3600);
        assert!(config.jwt_enabled());
        assert!(config.is_development());
    }
}
