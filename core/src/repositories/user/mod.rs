//! User directory module.

mod r#trait;
pub use r#trait::UserDirectory;

mod memory;
pub use memory::InMemoryUserDirectory;
