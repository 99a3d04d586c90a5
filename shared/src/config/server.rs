//! Listener and CORS settings

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where the HTTP listener binds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// actix worker count; 0 keeps the actix default (one per core)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Apply `SERVER_HOST`, `SERVER_PORT` and `SERVER_WORKERS` on top of this config
    pub fn overridden_from_env(self) -> Self {
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(self.host),
            port: env_or("SERVER_PORT", self.port),
            workers: env_or("SERVER_WORKERS", self.workers),
        }
    }

    /// `host:port` for `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Browser origins allowed to call the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Preflight cache lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Any origin, for local development
    pub fn development() -> Self {
        Self {
            allowed_origins: vec![String::from("*")],
            max_age: default_max_age(),
        }
    }

    /// Whether any origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }

    /// Apply `ALLOWED_ORIGINS` (comma separated) and `CORS_MAX_AGE`
    pub fn overridden_from_env(self) -> Self {
        let allowed_origins = match std::env::var("ALLOWED_ORIGINS") {
            Ok(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            Err(_) => self.allowed_origins,
        };
        Self {
            allowed_origins,
            max_age: env_or("CORS_MAX_AGE", self.max_age),
        }
    }
}

fn default_max_age() -> usize {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("127.0.0.1", 9000);
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.workers, 0);
    }

    #[test]
    fn test_cors_any_origin() {
        assert!(CorsConfig::development().allows_any_origin());
        assert!(!CorsConfig::default().allows_any_origin());
    }
}
