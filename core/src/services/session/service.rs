//! Session issuer: login, refresh, logout, introspection and per-request
//! authentication on top of the token codec and revocation registry.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::audit::{AuditEntry, SecurityEvent};
use crate::domain::entities::principal::Principal;
use crate::domain::entities::token::{Claims, TokenKind};
use crate::domain::value_objects::{AuthResponse, Introspection, LogoutSummary};
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::UserDirectory;
use crate::services::audit::{token_fingerprint, AuditService};
use crate::services::token::{RevocationRegistry, TokenCodec};

use super::config::SessionConfig;

/// Session issuer over a type-erased user directory
pub type DynSessionIssuer = SessionIssuer<dyn UserDirectory>;

/// Issues, refreshes and revokes sessions, and authenticates bearer tokens
pub struct SessionIssuer<U: UserDirectory + ?Sized> {
    /// External credential collaborator
    directory: Arc<U>,
    codec: Arc<TokenCodec>,
    registry: Arc<RevocationRegistry>,
    audit: AuditService,
    config: SessionConfig,
}

impl<U: UserDirectory + ?Sized> SessionIssuer<U> {
    pub fn new(
        directory: Arc<U>,
        codec: Arc<TokenCodec>,
        registry: Arc<RevocationRegistry>,
        audit: AuditService,
        config: SessionConfig,
    ) -> Self {
        Self {
            directory,
            codec,
            registry,
            audit,
            config,
        }
    }

    /// Whether token authentication is active
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    pub fn registry(&self) -> &Arc<RevocationRegistry> {
        &self.registry
    }

    pub fn audit(&self) -> &AuditService {
        &self.audit
    }

    /// Verify credentials and issue an access/refresh token pair
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Both tokens plus session metadata
    /// * `Err(AuthError::AuthDisabled)` - Token authentication is switched off
    /// * `Err(AuthError::InvalidCredentials)` - Unknown user or wrong secret
    pub async fn login(&self, username: &str, secret: &str) -> DomainResult<AuthResponse> {
        if !self.config.enabled {
            self.audit.event(SecurityEvent::LoginWhileDisabled, Some(username));
            return Err(AuthError::AuthDisabled.into());
        }

        let username = username.trim();
        self.audit.event(SecurityEvent::LoginAttempt, Some(username));

        if username.is_empty() || secret.is_empty() {
            self.audit.record(
                AuditEntry::new(SecurityEvent::LoginFailure)
                    .with_detail("reason", "blank credentials"),
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let identity = match self.directory.verify_credentials(username, secret).await? {
            Some(identity) => identity,
            None => {
                self.audit.event(SecurityEvent::LoginFailure, Some(username));
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let access = self
            .codec
            .issue(&identity.username, TokenKind::Access, Some(&identity.roles))?;
        let refresh = self
            .codec
            .issue(&identity.username, TokenKind::Refresh, None)?;

        self.audit.event(SecurityEvent::LoginSuccess, Some(&identity.username));
        self.audit.record(
            AuditEntry::new(SecurityEvent::TokenIssued)
                .with_subject(&identity.username)
                .with_detail("access_expires_at", access.claims.expires_at().to_rfc3339())
                .with_detail("refresh_expires_at", refresh.claims.expires_at().to_rfc3339()),
        );
        info!(username = %identity.username, "Issued session tokens");

        Ok(AuthResponse::from_access_claims(
            access.token,
            refresh.token,
            &access.claims,
        ))
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token itself is returned unchanged and stays usable until
    /// it expires or is revoked. Roles are looked up again rather than
    /// carried over from login.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        if !self.config.enabled {
            return Err(AuthError::AuthDisabled.into());
        }

        let refresh_token = refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(self.refresh_failed(TokenError::RefreshInvalid, None).into());
        }

        if self.registry.is_revoked(refresh_token) {
            return Err(self.refresh_failed(TokenError::Revoked, None).into());
        }

        let claims = match self.codec.parse(refresh_token) {
            Ok(claims) => claims,
            Err(err) => {
                self.audit.token_failure(&err, None, "refresh");
                return Err(self.refresh_failed(TokenError::RefreshInvalid, None).into());
            }
        };

        if let Err(err) = TokenCodec::expect_kind(&claims, TokenKind::Refresh) {
            self.audit.token_failure(&err, Some(&claims.sub), "refresh");
            return Err(err.into());
        }

        let roles = match self.directory.current_roles(&claims.sub).await? {
            Some(roles) => roles,
            None => {
                return Err(self
                    .refresh_failed(TokenError::RefreshInvalid, Some(&claims.sub))
                    .into());
            }
        };

        let access = self.codec.issue(&claims.sub, TokenKind::Access, Some(&roles))?;
        self.audit.record(
            AuditEntry::new(SecurityEvent::TokenRefreshed)
                .with_subject(&claims.sub)
                .with_detail("access_expires_at", access.claims.expires_at().to_rfc3339()),
        );

        Ok(AuthResponse::from_access_claims(
            access.token,
            refresh_token.to_string(),
            &access.claims,
        ))
    }

    /// Revoke the presented access token and, if given, the refresh token.
    ///
    /// Never fails: invalid, expired or missing tokens are recorded or
    /// skipped as the registry sees fit.
    pub fn logout(&self, access_token: &str, refresh_token: Option<&str>) -> LogoutSummary {
        let access = self.registry.revoke(access_token);
        let refresh = refresh_token.map(|token| self.registry.revoke(token));

        debug!(
            access = ?access,
            refresh = ?refresh,
            "Processed logout"
        );

        LogoutSummary { access, refresh }
    }

    /// Report whether an access token would currently be accepted
    pub fn introspect(&self, access_token: &str) -> Introspection {
        match self.authenticate_claims(access_token, "introspect") {
            Ok(claims) => {
                Introspection::active(claims.sub.clone(), TokenCodec::remaining_validity(&claims))
            }
            Err(_) => Introspection::inactive(),
        }
    }

    /// Validate an access token for a resource request.
    ///
    /// Checks run in order: signature and expiry, token kind, revocation.
    pub fn authenticate(&self, access_token: &str) -> Result<Principal, TokenError> {
        self.authenticate_claims(access_token, "authenticate")
            .map(|claims| Principal::from_claims(&claims))
    }

    fn authenticate_claims(&self, token: &str, context: &str) -> Result<Claims, TokenError> {
        let claims = self.codec.parse(token).map_err(|err| {
            self.audit.record(
                AuditEntry::new(err.event())
                    .with_severity(err.severity())
                    .with_detail("code", err.code())
                    .with_detail("context", context)
                    .with_detail("token", token_fingerprint(token)),
            );
            err
        })?;

        if let Err(err) = TokenCodec::expect_kind(&claims, TokenKind::Access) {
            self.audit.token_failure(&err, Some(&claims.sub), context);
            return Err(err);
        }

        if self.registry.is_revoked(token) {
            return Err(TokenError::Revoked);
        }

        Ok(claims)
    }

    fn refresh_failed(&self, error: TokenError, subject: Option<&str>) -> TokenError {
        let mut entry = AuditEntry::new(SecurityEvent::RefreshFailure)
            .with_severity(error.severity())
            .with_detail("code", error.code());
        if let Some(subject) = subject {
            entry = entry.with_subject(subject);
        }
        self.audit.record(entry);
        error
    }
}
