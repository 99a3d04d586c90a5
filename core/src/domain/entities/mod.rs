//! Domain entities representing core authentication objects.

pub mod audit;
pub mod principal;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use audit::{AuditEntry, SecurityEvent, Severity};
pub use principal::{Principal, UserIdentity, ROLE_PREFIX};
pub use token::{Claims, TokenKind, DEFAULT_ISSUER};
