//! Sharded in-memory revocation store.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::{has_lapsed, RevocationStore};

/// Revocation store on top of `DashMap`; each operation locks one shard.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: DashMap<String, DateTime<Utc>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn insert(&self, key: String, expires_at: DateTime<Utc>) {
        self.entries
            .entry(key)
            .and_modify(|current| {
                if expires_at > *current {
                    *current = expires_at;
                }
            })
            .or_insert(expires_at);
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn expired_keys(&self, now: DateTime<Utc>) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| has_lapsed(*entry.value(), now))
            .map(|entry| entry.key().clone())
            .collect()
    }

    fn remove_if_expired(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.entries
            .remove_if(key, |_, expires_at| has_lapsed(*expires_at, now))
            .is_some()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}
