//! Revocation store module.

mod r#trait;
pub use r#trait::{has_lapsed, RevocationStore};

mod memory;
pub use memory::InMemoryRevocationStore;
