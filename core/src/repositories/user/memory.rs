//! In-memory user directory for the server binary and tests.

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use dashmap::DashMap;
use std::collections::BTreeSet;

use crate::domain::entities::principal::UserIdentity;
use crate::errors::DomainError;

use super::UserDirectory;

/// Compared against when the username is unknown so both branches do the
/// same amount of work.
const DUMMY_SECRET: &str = "unknown-user-placeholder-secret";

#[derive(Debug, Clone)]
struct StoredUser {
    secret: String,
    roles: BTreeSet<String>,
}

/// Directory backed by a concurrent map of username to secret and roles
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<String, StoredUser>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert_user`](Self::insert_user)
    pub fn with_user<I, S>(self, username: &str, secret: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_user(username, secret, roles);
        self
    }

    /// Add or replace a user
    pub fn insert_user<I, S>(&self, username: &str, secret: &str, roles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users.insert(
            username.to_string(),
            StoredUser {
                secret: secret.to_string(),
                roles: roles.into_iter().map(Into::into).collect(),
            },
        );
    }

    /// Replace a user's roles. Returns false when the user does not exist.
    pub fn set_roles<I, S>(&self, username: &str, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.users.get_mut(username) {
            Some(mut user) => {
                user.roles = roles.into_iter().map(Into::into).collect();
                true
            }
            None => false,
        }
    }

    pub fn remove_user(&self, username: &str) -> bool {
        self.users.remove(username).is_some()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Parse a seed list of the form `user:secret:ROLE|ROLE,user2:secret2:ROLE`
    pub fn from_seed(seed: &str) -> Result<Self, DomainError> {
        let directory = Self::new();
        for entry in seed.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let mut parts = entry.splitn(3, ':');
            let username = parts.next().unwrap_or_default().trim();
            let secret = parts.next().unwrap_or_default();
            let roles = parts.next().unwrap_or("USER");

            if username.is_empty() || secret.is_empty() {
                return Err(DomainError::Validation {
                    message: format!("invalid user seed entry for '{}'", username),
                });
            }

            directory.insert_user(
                username,
                secret,
                roles
                    .split('|')
                    .map(str::trim)
                    .filter(|role| !role.is_empty()),
            );
        }
        Ok(directory)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn verify_credentials(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<Option<UserIdentity>, DomainError> {
        let stored = self.users.get(username).map(|user| user.value().clone());

        match stored {
            Some(user) if constant_time_eq(user.secret.as_bytes(), secret.as_bytes()) => {
                Ok(Some(UserIdentity {
                    username: username.to_string(),
                    roles: user.roles,
                }))
            }
            Some(_) => Ok(None),
            None => {
                let _ = constant_time_eq(DUMMY_SECRET.as_bytes(), secret.as_bytes());
                Ok(None)
            }
        }
    }

    async fn current_roles(
        &self,
        username: &str,
    ) -> Result<Option<BTreeSet<String>>, DomainError> {
        Ok(self.users.get(username).map(|user| user.roles.clone()))
    }
}
