//! Audit service module

mod service;

pub use service::{token_fingerprint, AuditService};
