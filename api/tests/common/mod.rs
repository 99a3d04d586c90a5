//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use actix_web::{http::header, test, web};
use std::sync::Arc;
use td_api::app::AppState;
use td_core::{AuditService, InMemoryUserDirectory, MemoryAuditSink};
use td_shared::{AuthConfig, JwtConfig};

pub const TEST_SECRET: &str = "integration-test-secret-that-is-long-enough";

pub fn auth_config(enabled: bool) -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig::new(TEST_SECRET).with_enabled(enabled),
        ..Default::default()
    }
}

pub fn directory() -> InMemoryUserDirectory {
    InMemoryUserDirectory::new()
        .with_user("alice", "alice-password", ["USER"])
        .with_user("admin", "admin-password", ["USER", "ADMIN"])
}

/// Application state over the fixture directory with a recording audit sink
pub fn test_state(enabled: bool) -> (web::Data<AppState>, Arc<MemoryAuditSink>) {
    let sink = Arc::new(MemoryAuditSink::new());
    let state = AppState::build(
        auth_config(enabled),
        Arc::new(directory()),
        AuditService::new(sink.clone()),
    )
    .unwrap();
    (web::Data::new(state), sink)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// `POST /api/v1/auth/login` with the given credentials
pub fn login_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "username": username, "password": password }))
}
