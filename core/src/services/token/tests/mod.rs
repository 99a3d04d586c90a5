
use std::sync::Arc;

use chrono::Duration;

use crate::repositories::MemoryAuditSink;
use crate::services::audit::AuditService;

use super::{RevocationRegistry, TokenCodec, TokenCodecConfig};

pub(super) const TEST_SECRET: &str = "test-secret-key-that-is-long-enough-for-hs256";

pub(super) fn test_codec() -> Arc<TokenCodec> {
    let config = TokenCodecConfig::new(TEST_SECRET)
        .with_lifetimes(Duration::minutes(15), Duration::days(7));
    Arc::new(TokenCodec::new(config).unwrap())
}

pub(super) fn test_registry() -> (RevocationRegistry, Arc<MemoryAuditSink>) {
    let sink = Arc::new(MemoryAuditSink::new());
    let registry = RevocationRegistry::in_memory(test_codec(), AuditService::new(sink.clone()));
    (registry, sink)
}
