//! Shared configuration and wire types for the Taskdeck server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (auth, revocation, server, CORS, logging)
//! - The error body returned by every failing endpoint
//! - Stable error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, Environment, JwtConfig, LoggingConfig, RevocationConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
