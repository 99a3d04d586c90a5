pub mod auth;
pub mod cors;

pub use auth::{AuthContext, AuthGate, OptionalAuth};
pub use cors::create_cors;
