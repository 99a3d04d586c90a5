//! Integration tests for the authentication gate

mod common;

use actix_web::{
    dev::Service,
    http::{header, Method},
    test, web, App, HttpMessage, HttpResponse,
};
use chrono::Duration;
use std::sync::Arc;
use td_api::app::create_app;
use td_api::dto::auth::TokenResponse;
use td_api::middleware::auth::{AuthContext, AuthGate};
use td_core::{Principal, SecurityEvent, TokenKind};
use td_shared::CorsConfig;

use common::{bearer, login_request, test_state};

async fn whoami(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "username": auth.username() }))
}

#[actix_web::test]
async fn test_missing_token_is_rejected() {
    let (state, _) = test_state(true);
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "authentication_required");
}

#[actix_web::test]
async fn test_garbage_token_is_rejected_without_detail() {
    let (state, sink) = test_state(true);
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer("not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "token_invalid");
    assert_eq!(body["message"], "Invalid token");
    assert_eq!(sink.count_of(SecurityEvent::GateRejection), 1);
}

#[actix_web::test]
async fn test_valid_access_token_reaches_handler() {
    let (state, _) = test_state(true);
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let tokens: TokenResponse =
        test::call_and_read_body_json(&app, login_request("alice", "alice-password").to_request())
            .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&tokens.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["roles"], serde_json::json!(["USER"]));
    assert_eq!(body["authorities"], serde_json::json!(["ROLE_USER"]));
}

#[actix_web::test]
async fn test_refresh_token_is_not_accepted_for_resources() {
    let (state, sink) = test_state(true);
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let tokens: TokenResponse =
        test::call_and_read_body_json(&app, login_request("alice", "alice-password").to_request())
            .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&tokens.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "token_invalid");
    assert_eq!(sink.count_of(SecurityEvent::WrongTokenKind), 1);
}

#[actix_web::test]
async fn test_expired_access_token_is_reported_as_expired() {
    let (state, _) = test_state(true);
    let expired = state
        .session
        .codec()
        .issue_with_lifetime("alice", TokenKind::Access, None, Duration::seconds(-30))
        .unwrap();
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&expired.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "token_expired");
}

#[actix_web::test]
async fn test_query_param_token_is_accepted_and_audited() {
    let (state, sink) = test_state(true);
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let tokens: TokenResponse =
        test::call_and_read_body_json(&app, login_request("alice", "alice-password").to_request())
            .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/auth/me?token={}", tokens.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(sink.count_of(SecurityEvent::TokenFromQueryParam), 1);
}

#[actix_web::test]
async fn test_public_paths_and_preflight_bypass_gate() {
    let (state, _) = test_state(true);
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get().uri("/api/v1/auth/config").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/v1/auth/me")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_unknown_path_requires_authentication() {
    let (state, _) = test_state(true);
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get().uri("/api/v1/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_stale_context_is_cleared_before_rejection() {
    let (state, _) = test_state(true);
    let stale = AuthContext {
        principal: Principal {
            username: "mallory".to_string(),
            roles: ["ADMIN".to_string()].into_iter().collect(),
            token_id: "stale".to_string(),
            expires_at: chrono::Utc::now() + Duration::hours(1),
        },
        client_ip: "127.0.0.1".to_string(),
    };

    let app = test::init_service(
        App::new()
            .wrap(AuthGate::new(Arc::clone(&state.session)))
            .wrap_fn(move |req, srv| {
                req.extensions_mut().insert(stale.clone());
                srv.call(req)
            })
            .route("/api/v1/whoami", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header(bearer("forged"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let access = state
        .session
        .codec()
        .issue("alice", TokenKind::Access, None)
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header(bearer(&access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
}

#[actix_web::test]
async fn test_binding_does_not_outlive_request() {
    let (state, _) = test_state(true);
    let app = test::init_service(
        App::new()
            .wrap(AuthGate::new(Arc::clone(&state.session)))
            .route("/api/v1/whoami", web::get().to(whoami)),
    )
    .await;

    let access = state
        .session
        .codec()
        .issue("alice", TokenKind::Access, None)
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/whoami")
        .insert_header(bearer(&access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(resp.request().extensions().get::<AuthContext>().is_none());
}

#[actix_web::test]
async fn test_disabled_gate_leaves_requests_unbound() {
    let (state, _) = test_state(false);
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    // Without an external auth layer nothing is bound, so the extractor refuses
    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "authentication_required");

    // Unknown paths are routed normally instead of being rejected by the gate
    let req = test::TestRequest::get().uri("/api/v1/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_successful_authentication_is_audited() {
    let (state, sink) = test_state(true);
    let long_lived = state
        .session
        .codec()
        .issue_with_lifetime("alice", TokenKind::Access, None, Duration::hours(2))
        .unwrap();
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&long_lived.token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
    assert_eq!(sink.count_of(SecurityEvent::GateAuthenticated), 1);
    assert_eq!(sink.count_of(SecurityEvent::TokenExpiringSoon), 0);

    // Login tokens live 15 minutes, inside the one-hour warning window
    let tokens: TokenResponse =
        test::call_and_read_body_json(&app, login_request("alice", "alice-password").to_request())
            .await;
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&tokens.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
    assert_eq!(sink.count_of(SecurityEvent::GateAuthenticated), 2);
    assert_eq!(sink.count_of(SecurityEvent::TokenExpiringSoon), 1);

    let expiring = sink
        .entries()
        .into_iter()
        .find(|entry| entry.event == SecurityEvent::TokenExpiringSoon)
        .unwrap();
    assert_eq!(expiring.subject.as_deref(), Some("alice"));
}
