//! User directory trait: the external credential collaborator.
//!
//! Password storage and hashing live outside the authentication core. The
//! core only asks whether a credential pair is valid and which roles a user
//! currently holds.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::domain::entities::principal::UserIdentity;
use crate::errors::DomainError;

/// Source of truth for credentials and role assignments
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use std::collections::BTreeSet;
/// use td_core::domain::entities::UserIdentity;
/// use td_core::errors::DomainError;
/// use td_core::repositories::UserDirectory;
///
/// struct LdapDirectory;
///
/// #[async_trait]
/// impl UserDirectory for LdapDirectory {
///     async fn verify_credentials(
///         &self,
///         _username: &str,
///         _secret: &str,
///     ) -> Result<Option<UserIdentity>, DomainError> {
///         Ok(None)
///     }
///
///     async fn current_roles(
///         &self,
///         _username: &str,
///     ) -> Result<Option<BTreeSet<String>>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Check a username/secret pair
    ///
    /// # Returns
    /// * `Ok(Some(UserIdentity))` - Credentials match
    /// * `Ok(None)` - Unknown user or wrong secret (not distinguished)
    /// * `Err(DomainError)` - The directory itself failed
    async fn verify_credentials(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<Option<UserIdentity>, DomainError>;

    /// Roles the user holds right now
    ///
    /// # Returns
    /// * `Ok(Some(roles))` - User exists
    /// * `Ok(None)` - User no longer exists
    async fn current_roles(&self, username: &str)
        -> Result<Option<BTreeSet<String>>, DomainError>;
}
