//! Session module
//!
//! Login, refresh, logout and introspection flows, plus the synchronous
//! access-token check used by the request gate.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::SessionConfig;
pub use service::{DynSessionIssuer, SessionIssuer};
