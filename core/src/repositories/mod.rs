//! Storage and collaborator interfaces with their in-memory implementations.

pub mod audit;
pub mod revocation;
pub mod user;

pub use audit::{AuditSink, MemoryAuditSink, TracingAuditSink};
pub use revocation::{InMemoryRevocationStore, RevocationStore};
pub use user::{InMemoryUserDirectory, UserDirectory};
