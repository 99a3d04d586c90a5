//! Revocation registry: process-wide record of tokens invalidated before
//! their natural expiry.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info, warn};

use td_shared::config::RevocationConfig;

use crate::domain::entities::audit::{AuditEntry, SecurityEvent};
use crate::domain::value_objects::session::{RevocationOutcome, SweepResult};
use crate::errors::DomainError;
use crate::repositories::revocation::has_lapsed;
use crate::repositories::{InMemoryRevocationStore, RevocationStore};
use crate::services::audit::{token_fingerprint, AuditService};

use super::codec::TokenCodec;

/// Longest fallback retention accepted: one year
pub const MAX_FALLBACK_RETENTION_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Longest sweep interval accepted: one week
pub const MAX_SWEEP_INTERVAL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Registry key for a wire token: hex SHA-256 of its exact bytes
pub fn revocation_key(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Tracks revoked tokens until they would have expired anyway
pub struct RevocationRegistry {
    store: Arc<dyn RevocationStore>,
    codec: Arc<TokenCodec>,
    audit: AuditService,
    fallback_retention: Duration,
}

impl RevocationRegistry {
    /// Creates a registry, refusing retention or sweep settings outside
    /// `1..=MAX_FALLBACK_RETENTION_SECONDS` and `1..=MAX_SWEEP_INTERVAL_SECONDS`
    pub fn new(
        store: Arc<dyn RevocationStore>,
        codec: Arc<TokenCodec>,
        audit: AuditService,
        config: &RevocationConfig,
    ) -> Result<Self, DomainError> {
        validate_config(config)?;

        Ok(Self {
            store,
            codec,
            audit,
            fallback_retention: Duration::seconds(config.fallback_retention_seconds),
        })
    }

    /// Registry over a fresh in-memory store with default retention
    pub fn in_memory(codec: Arc<TokenCodec>, audit: AuditService) -> Self {
        Self {
            store: Arc::new(InMemoryRevocationStore::new()),
            codec,
            audit,
            fallback_retention: Duration::seconds(
                RevocationConfig::default().fallback_retention_seconds,
            ),
        }
    }

    /// Revoke a token. Idempotent; never fails.
    pub fn revoke(&self, token: &str) -> RevocationOutcome {
        self.revoke_at(token, Utc::now())
    }

    /// Revoke as of `now`
    pub fn revoke_at(&self, token: &str, now: DateTime<Utc>) -> RevocationOutcome {
        let token = token.trim();
        if token.is_empty() {
            return RevocationOutcome::Ignored;
        }

        let key = revocation_key(token);
        let fingerprint = token_fingerprint(token);

        match self.codec.read_expiry(token) {
            Ok(expires_at) if has_lapsed(expires_at, now) => {
                debug!(token = %fingerprint, "Skipping revocation of expired token");
                RevocationOutcome::AlreadyExpired
            }
            Ok(expires_at) => {
                self.store.insert(key, expires_at);
                self.audit.record(
                    AuditEntry::new(SecurityEvent::TokenRevoked)
                        .with_detail("token", &fingerprint)
                        .with_detail("expires_at", expires_at.to_rfc3339()),
                );
                RevocationOutcome::Revoked { expires_at }
            }
            Err(err) => {
                let retain_until = now
                    .checked_add_signed(self.fallback_retention)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                self.store.insert(key, retain_until);
                warn!(
                    token = %fingerprint,
                    reason = err.code(),
                    "Revoked token with unreadable expiry, retaining until {}",
                    retain_until
                );
                self.audit.record(
                    AuditEntry::new(SecurityEvent::TokenRevoked)
                        .with_detail("token", &fingerprint)
                        .with_detail("fallback_until", retain_until.to_rfc3339())
                        .with_detail("reason", err.code()),
                );
                RevocationOutcome::RevokedWithFallback { retain_until }
            }
        }
    }

    /// Membership test. A hit is a high-severity event: someone presented a
    /// token after it was revoked.
    pub fn is_revoked(&self, token: &str) -> bool {
        let token = token.trim();
        let revoked = self.store.contains(&revocation_key(token));
        if revoked {
            self.audit.record(
                AuditEntry::new(SecurityEvent::RevokedTokenReuse)
                    .with_detail("token", token_fingerprint(token)),
            );
        }
        revoked
    }

    /// Remove every entry whose expiry has passed
    pub fn sweep(&self) -> SweepResult {
        self.sweep_at(Utc::now())
    }

    /// Sweep as of `now`. Entries are removed one at a time; concurrent
    /// revokes and lookups proceed between removals.
    pub fn sweep_at(&self, now: DateTime<Utc>) -> SweepResult {
        let removed = self
            .store
            .expired_keys(now)
            .iter()
            .filter(|key| self.store.remove_if_expired(key, now))
            .count();
        let result = SweepResult {
            removed,
            remaining: self.store.len(),
        };

        if removed > 0 {
            info!(
                removed = result.removed,
                remaining = result.remaining,
                "Swept expired revocation entries"
            );
            self.audit.record(
                AuditEntry::new(SecurityEvent::SweepCompleted)
                    .with_detail("removed", result.removed)
                    .with_detail("remaining", result.remaining),
            );
        } else {
            debug!(remaining = result.remaining, "Revocation sweep found nothing to remove");
        }

        result
    }

    /// Number of entries currently held
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Administrative reset. Returns how many entries were dropped.
    pub fn clear_all(&self) -> usize {
        let cleared = self.store.clear();
        warn!(cleared, "Revocation registry cleared");
        self.audit.record(
            AuditEntry::new(SecurityEvent::RevocationListCleared).with_detail("cleared", cleared),
        );
        cleared
    }
}

fn validate_config(config: &RevocationConfig) -> Result<(), DomainError> {
    let retention = config.fallback_retention_seconds;
    if !(1..=MAX_FALLBACK_RETENTION_SECONDS).contains(&retention) {
        return Err(DomainError::Validation {
            message: format!(
                "revocation fallback retention must be between 1 and {} seconds, got {}",
                MAX_FALLBACK_RETENTION_SECONDS, retention
            ),
        });
    }

    let interval = config.sweep_interval_seconds;
    if !(1..=MAX_SWEEP_INTERVAL_SECONDS).contains(&interval) {
        return Err(DomainError::Validation {
            message: format!(
                "revocation sweep interval must be between 1 and {} seconds, got {}",
                MAX_SWEEP_INTERVAL_SECONDS, interval
            ),
        });
    }

    Ok(())
}

impl std::fmt::Debug for RevocationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationRegistry")
            .field("size", &self.size())
            .field("fallback_retention", &self.fallback_retention)
            .finish_non_exhaustive()
    }
}
