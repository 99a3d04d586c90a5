//! Revocation store trait: storage behind the revocation registry.

use chrono::{DateTime, Utc};

/// Whether an entry recorded until `expires_at` may be dropped at `now`.
///
/// Token expiry has one-second resolution and a token is accepted through the
/// whole second named by its expiry, so an entry lapses only once `now` is in
/// a later second.
pub fn has_lapsed(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at.timestamp() < now.timestamp()
}

/// Concurrent key/expiry storage for revoked tokens
///
/// Implementations must be linearizable per key: once `insert` returns,
/// every later `contains` for that key, from any thread, observes it.
/// No operation may hold a lock across the whole store.
pub trait RevocationStore: Send + Sync {
    /// Record `key` until `expires_at`. Re-inserting keeps the later expiry.
    fn insert(&self, key: String, expires_at: DateTime<Utc>);

    fn contains(&self, key: &str) -> bool;

    /// Keys whose expiry has lapsed at `now`
    fn expired_keys(&self, now: DateTime<Utc>) -> Vec<String>;

    /// Remove `key` only if it is still lapsed at `now`.
    /// Returns true when an entry was removed.
    fn remove_if_expired(&self, key: &str, now: DateTime<Utc>) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry, returning how many were removed
    fn clear(&self) -> usize;
}
