//! Unit tests for the session issuer

use chrono::Duration;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::mocks::{codec, directory, harness, harness_with, CountingUserDirectory, FailingUserDirectory};
use crate::domain::entities::audit::{SecurityEvent, Severity};
use crate::domain::entities::token::TokenKind;
use crate::domain::value_objects::RevocationOutcome;
use crate::errors::{AuthError, DomainError, TokenError};

#[tokio::test]
async fn test_login_issues_usable_token_pair() {
    let h = harness();
    let response = h.issuer.login("admin", "admin-password").await.unwrap();

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.username, "admin");
    assert!(response.roles.contains("ADMIN"));
    assert!(response.roles.contains("USER"));
    assert_eq!(response.expires_in, 900);
    assert!((response.expires_at - response.issued_at - Duration::seconds(900)).num_seconds().abs() <= 1);

    let principal = h.issuer.authenticate(&response.access_token).unwrap();
    assert_eq!(principal.username, "admin");
    assert_eq!(principal.roles, response.roles);

    let refresh_claims = h.issuer.codec().parse(&response.refresh_token).unwrap();
    assert_eq!(refresh_claims.token_type, TokenKind::Refresh);
    assert!(refresh_claims.roles.is_none());

    assert_eq!(h.sink.count_of(SecurityEvent::LoginSuccess), 1);
    assert_eq!(h.sink.count_of(SecurityEvent::TokenIssued), 1);
}

#[tokio::test]
async fn test_login_does_not_reveal_whether_user_exists() {
    let h = harness();

    let wrong_password = h.issuer.login("alice", "nope").await.unwrap_err();
    let unknown_user = h.issuer.login("mallory", "nope").await.unwrap_err();

    assert_eq!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(unknown_user, wrong_password);
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    assert_eq!(h.sink.count_of(SecurityEvent::LoginFailure), 2);
}

#[tokio::test]
async fn test_login_with_blank_credentials() {
    let h = harness();
    assert_eq!(
        h.issuer.login("  ", "x").await.unwrap_err(),
        DomainError::Auth(AuthError::InvalidCredentials)
    );
    assert_eq!(
        h.issuer.login("alice", "").await.unwrap_err(),
        DomainError::Auth(AuthError::InvalidCredentials)
    );
}

#[tokio::test]
async fn test_login_when_disabled() {
    let h = harness_with(directory(), false);

    assert!(!h.issuer.is_enabled());
    assert_eq!(
        h.issuer.login("alice", "alice-password").await.unwrap_err(),
        DomainError::Auth(AuthError::AuthDisabled)
    );
    assert_eq!(h.sink.count_of(SecurityEvent::LoginWhileDisabled), 1);
}

#[tokio::test]
async fn test_directory_failure_fails_closed() {
    let h = harness_with(FailingUserDirectory, true);
    let result = h.issuer.login("alice", "alice-password").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_and_rederives_roles() {
    let h = harness_with(CountingUserDirectory::new(directory()), true);
    let login = h.issuer.login("alice", "alice-password").await.unwrap();
    assert!(!login.roles.contains("ADMIN"));

    h.directory.inner.set_roles("alice", ["USER", "ADMIN"]);

    let refreshed = h.issuer.refresh(&login.refresh_token).await.unwrap();
    assert_eq!(refreshed.refresh_token, login.refresh_token);
    assert_ne!(refreshed.access_token, login.access_token);
    assert!(refreshed.roles.contains("ADMIN"));
    assert_eq!(h.directory.role_lookups.load(Ordering::SeqCst), 1);

    let principal = h.issuer.authenticate(&refreshed.access_token).unwrap();
    assert!(principal.has_role("ADMIN"));

    // No rotation: the same refresh token works again
    assert!(h.issuer.refresh(&login.refresh_token).await.is_ok());
    assert_eq!(h.sink.count_of(SecurityEvent::TokenRefreshed), 2);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let h = harness();
    let login = h.issuer.login("alice", "alice-password").await.unwrap();

    assert_eq!(
        h.issuer.refresh(&login.access_token).await.unwrap_err(),
        DomainError::Token(TokenError::WrongKind {
            expected: TokenKind::Refresh,
            actual: TokenKind::Access,
        })
    );
    assert_eq!(h.sink.count_of(SecurityEvent::WrongTokenKind), 1);
}

#[tokio::test]
async fn test_refresh_with_expired_token() {
    let h = harness();
    let expired = codec()
        .issue_with_lifetime("alice", TokenKind::Refresh, None, Duration::seconds(-5))
        .unwrap()
        .token;

    assert_eq!(
        h.issuer.refresh(&expired).await.unwrap_err(),
        DomainError::Token(TokenError::RefreshInvalid)
    );
    assert_eq!(h.sink.count_of(SecurityEvent::TokenExpired), 1);
    assert_eq!(h.sink.count_of(SecurityEvent::TokenRefreshed), 0);
}

#[tokio::test]
async fn test_refresh_with_revoked_token() {
    let h = harness();
    let login = h.issuer.login("alice", "alice-password").await.unwrap();
    h.issuer.logout(&login.access_token, Some(&login.refresh_token));

    assert_eq!(
        h.issuer.refresh(&login.refresh_token).await.unwrap_err(),
        DomainError::Token(TokenError::Revoked)
    );
    assert_eq!(h.sink.count_of(SecurityEvent::RevokedTokenReuse), 1);
}

#[tokio::test]
async fn test_refresh_for_removed_user() {
    let h = harness();
    let login = h.issuer.login("alice", "alice-password").await.unwrap();
    h.directory.remove_user("alice");

    assert_eq!(
        h.issuer.refresh(&login.refresh_token).await.unwrap_err(),
        DomainError::Token(TokenError::RefreshInvalid)
    );
}

#[tokio::test]
async fn test_refresh_with_garbage() {
    let h = harness();
    assert_eq!(
        h.issuer.refresh("").await.unwrap_err(),
        DomainError::Token(TokenError::RefreshInvalid)
    );
    assert_eq!(
        h.issuer.refresh("a.b.c").await.unwrap_err(),
        DomainError::Token(TokenError::RefreshInvalid)
    );
}

#[tokio::test]
async fn test_logout_revokes_presented_tokens() {
    let h = harness();
    let login = h.issuer.login("alice", "alice-password").await.unwrap();

    let summary = h.issuer.logout(&login.access_token, Some(&login.refresh_token));
    assert!(summary.access.is_recorded());
    assert!(summary.refresh.map(|o| o.is_recorded()).unwrap_or(false));
    assert_eq!(h.issuer.registry().size(), 2);

    assert_eq!(
        h.issuer.authenticate(&login.access_token).unwrap_err(),
        TokenError::Revoked
    );
}

#[tokio::test]
async fn test_logout_always_succeeds() {
    let h = harness();
    let expired = codec()
        .issue_with_lifetime("alice", TokenKind::Access, None, Duration::seconds(-5))
        .unwrap()
        .token;

    let summary = h.issuer.logout(&expired, Some("not-even-a-token"));
    assert_eq!(summary.access, RevocationOutcome::AlreadyExpired);
    assert!(matches!(
        summary.refresh,
        Some(RevocationOutcome::RevokedWithFallback { .. })
    ));

    let summary = h.issuer.logout("", None);
    assert_eq!(summary.access, RevocationOutcome::Ignored);
    assert!(summary.refresh.is_none());
}

#[tokio::test]
async fn test_introspect() {
    let h = harness();
    let login = h.issuer.login("alice", "alice-password").await.unwrap();

    let status = h.issuer.introspect(&login.access_token);
    assert!(status.valid);
    assert_eq!(status.subject.as_deref(), Some("alice"));
    let remaining = status.remaining_validity_seconds.unwrap();
    assert!((899..=900).contains(&remaining));

    // Refresh tokens are not access credentials
    assert!(!h.issuer.introspect(&login.refresh_token).valid);

    h.issuer.logout(&login.access_token, None);
    let revoked = h.issuer.introspect(&login.access_token);
    assert!(!revoked.valid);
    assert!(revoked.subject.is_none());
    assert!(revoked.remaining_validity_seconds.is_none());
}

#[tokio::test]
async fn test_authenticate_rejections() {
    let h = harness();
    let login = h.issuer.login("alice", "alice-password").await.unwrap();

    assert_eq!(
        h.issuer.authenticate(&login.refresh_token).unwrap_err(),
        TokenError::WrongKind {
            expected: TokenKind::Access,
            actual: TokenKind::Refresh,
        }
    );

    let mut tampered = login.access_token.clone();
    tampered.push('x');
    assert_eq!(
        h.issuer.authenticate(&tampered).unwrap_err(),
        TokenError::SignatureInvalid
    );

    let high = h
        .sink
        .entries()
        .into_iter()
        .filter(|entry| entry.event == SecurityEvent::SignatureInvalid)
        .all(|entry| entry.severity == Severity::High);
    assert!(high);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_authentication_with_same_token() {
    let h = harness();
    let login = h.issuer.login("alice", "alice-password").await.unwrap();
    let issuer = Arc::new(h.issuer);
    let token = Arc::new(login.access_token);

    let tasks: Vec<_> = (0..100)
        .map(|_| {
            let issuer = issuer.clone();
            let token = token.clone();
            tokio::spawn(async move { issuer.authenticate(&token) })
        })
        .collect();

    for task in tasks {
        let principal = task.await.unwrap().unwrap();
        assert_eq!(principal.username, "alice");
    }
}
