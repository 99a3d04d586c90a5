//! Value objects returned by the session and revocation services.

pub mod auth_response;
pub mod session;

pub use auth_response::{AuthResponse, BEARER};
pub use session::{Introspection, LogoutSummary, RevocationOutcome, SweepResult};
