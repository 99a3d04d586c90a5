//! Token module
//!
//! This module handles all token-related operations:
//! - Issuing and parsing signed access and refresh tokens
//! - Recording revoked tokens until their natural expiry
//! - Background sweeping of lapsed revocation entries

mod codec;
mod config;
mod registry;
mod sweeper;

#[cfg(test)]
mod tests;

pub use codec::{IssuedToken, TokenCodec};
pub use config::{TokenCodecConfig, MAX_LIFETIME_SECONDS, MIN_SECRET_BYTES};
pub use registry::{
    revocation_key, RevocationRegistry, MAX_FALLBACK_RETENTION_SECONDS, MAX_SWEEP_INTERVAL_SECONDS,
};
pub use sweeper::{RevocationSweeper, SweeperHandle};
