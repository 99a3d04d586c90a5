//! Unit tests for token claims and principals

use chrono::{Duration, Utc};
use std::collections::BTreeSet;

use crate::domain::entities::principal::{Principal, UserIdentity};
use crate::domain::entities::token::{Claims, TokenKind, DEFAULT_ISSUER};

fn roles(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn test_access_claims_keep_roles() {
    let now = Utc::now();
    let claims = Claims::new(
        "alice",
        TokenKind::Access,
        Some(roles(&["USER", "ADMIN"])),
        DEFAULT_ISSUER,
        now,
        Duration::minutes(15),
    );

    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.iss, DEFAULT_ISSUER);
    assert!(claims.is_kind(TokenKind::Access));
    assert_eq!(claims.roles(), roles(&["ADMIN", "USER"]));
    assert_eq!(claims.exp - claims.iat, 900);
    assert_eq!(claims.nbf, claims.iat);
    assert!(!claims.is_expired_at(now));
}

#[test]
fn test_refresh_claims_drop_roles() {
    let claims = Claims::new(
        "alice",
        TokenKind::Refresh,
        Some(roles(&["USER"])),
        DEFAULT_ISSUER,
        Utc::now(),
        Duration::days(7),
    );

    assert!(claims.is_kind(TokenKind::Refresh));
    assert!(claims.roles.is_none());
    assert!(claims.roles().is_empty());

    let json = serde_json::to_value(&claims).unwrap();
    assert_eq!(json["token_type"], "REFRESH");
    assert!(json.get("roles").is_none());
}

#[test]
fn test_each_token_gets_unique_id() {
    let now = Utc::now();
    let a = Claims::new("bob", TokenKind::Access, None, DEFAULT_ISSUER, now, Duration::minutes(1));
    let b = Claims::new("bob", TokenKind::Access, None, DEFAULT_ISSUER, now, Duration::minutes(1));
    assert_ne!(a.jti, b.jti);
}

#[test]
fn test_remaining_validity() {
    let now = Utc::now();
    let claims = Claims::new("bob", TokenKind::Access, None, DEFAULT_ISSUER, now, Duration::seconds(60));

    assert_eq!(claims.remaining_validity_at(now), 60);
    assert_eq!(claims.remaining_validity_at(now + Duration::seconds(45)), 15);
    assert_eq!(claims.remaining_validity_at(now + Duration::seconds(120)), 0);
    assert!(!claims.is_expired_at(now + Duration::seconds(60)));
    assert!(claims.is_expired_at(now + Duration::seconds(61)));
}

#[test]
fn test_principal_from_claims() {
    let claims = Claims::new(
        "carol",
        TokenKind::Access,
        Some(roles(&["USER", "ADMIN"])),
        DEFAULT_ISSUER,
        Utc::now(),
        Duration::minutes(5),
    );
    let principal = Principal::from_claims(&claims);

    assert_eq!(principal.username, "carol");
    assert_eq!(principal.token_id, claims.jti);
    assert_eq!(principal.expires_at.timestamp(), claims.exp);
    assert!(principal.has_role("ADMIN"));
    assert!(principal.has_role("ROLE_ADMIN"));
    assert!(!principal.has_role("AUDITOR"));
    assert_eq!(principal.authorities(), vec!["ROLE_ADMIN", "ROLE_USER"]);
}

#[test]
fn test_user_identity_new() {
    let identity = UserIdentity::new("dave", ["USER"]);
    assert_eq!(identity.username, "dave");
    assert!(identity.roles.contains("USER"));
}
