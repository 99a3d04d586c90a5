//! # Taskdeck Core
//!
//! Token authentication core for the Taskdeck backend.
//! This crate contains the token codec, the revocation registry and its
//! background sweeper, the session issuer, the security audit trail, and
//! the error taxonomy shared with the HTTP layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AuditEntry, Claims, Principal, SecurityEvent, Severity, TokenKind, UserIdentity,
};
pub use domain::value_objects::{
    AuthResponse, Introspection, LogoutSummary, RevocationOutcome, SweepResult,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    AuditSink, InMemoryRevocationStore, InMemoryUserDirectory, MemoryAuditSink,
    RevocationStore, TracingAuditSink, UserDirectory,
};
pub use services::{
    AuditService, DynSessionIssuer, RevocationRegistry, RevocationSweeper, SessionConfig,
    SessionIssuer, SweeperHandle, TokenCodec, TokenCodecConfig,
};
