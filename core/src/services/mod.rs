//! Business services containing the authentication use cases.

pub mod audit;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use audit::{token_fingerprint, AuditService};
pub use session::{DynSessionIssuer, SessionConfig, SessionIssuer};
pub use token::{
    revocation_key, IssuedToken, RevocationRegistry, RevocationSweeper, SweeperHandle,
    TokenCodec, TokenCodecConfig,
};
