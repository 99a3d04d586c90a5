//! Authentication gate for protecting API endpoints.
//!
//! The gate extracts a bearer token from the Authorization header (or, for
//! clients that cannot set headers, the `token` query parameter), asks the
//! session issuer to authenticate it, and binds an [`AuthContext`] to the
//! request. The binding lives in the request extensions only and is removed
//! again once the downstream service has produced its result.
//!
//! Requests to the public allow-list and CORS preflights pass through
//! untouched. When token authentication is disabled every request passes
//! through without a binding, leaving authentication to whatever fallback
//! layer is mounted in front of the handlers.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::AUTHORIZATION, Method},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashMap,
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use td_core::{AuditEntry, AuthError, DomainError, DynSessionIssuer, Principal, SecurityEvent};

use crate::handlers::error::{domain_error, gate_rejection};

/// Below this much remaining validity a successful authentication is
/// also recorded as `TOKEN_EXPIRING_SOON`
pub const EXPIRING_SOON_SECONDS: i64 = 60 * 60;

/// Paths reachable without a token
pub const PUBLIC_PATHS: &[&str] = &[
    "/health",
    "/api/v1/auth/login",
    "/api/v1/auth/refresh",
    "/api/v1/auth/validate",
    "/api/v1/auth/status",
    "/api/v1/auth/config",
    "/api/v1/auth/logout",
];

const BEARER_PREFIX: &str = "Bearer ";
const TOKEN_QUERY_PARAM: &str = "token";

/// Authenticated identity bound to a single request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub principal: Principal,
    /// Client address used for audit records
    pub client_ip: String,
}

impl AuthContext {
    pub fn username(&self) -> &str {
        &self.principal.username
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.principal.has_role(role)
    }

    /// Fail with 403 unless the principal holds `role`
    pub fn require_role(&self, role: &str) -> Result<(), Error> {
        if self.has_role(role) {
            return Ok(());
        }
        log::warn!(
            "User {} from {} lacks role {}",
            self.principal.username,
            self.client_ip,
            role
        );
        Err(domain_error(DomainError::Auth(
            AuthError::InsufficientPermissions,
        )))
    }
}

/// Authentication gate middleware factory
pub struct AuthGate {
    issuer: Arc<DynSessionIssuer>,
}

impl AuthGate {
    pub fn new(issuer: Arc<DynSessionIssuer>) -> Self {
        Self { issuer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            issuer: Arc::clone(&self.issuer),
        }))
    }
}

/// Authentication gate middleware service
pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    issuer: Arc<DynSessionIssuer>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let issuer = Arc::clone(&self.issuer);

        Box::pin(async move {
            if !issuer.is_enabled() || is_exempt(req.method(), req.path()) {
                return service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body);
            }

            // Nothing bound before this point may reach the handlers
            req.extensions_mut().remove::<AuthContext>();

            let client_ip = get_client_ip(&req);
            let path = req.path().to_string();

            let token = match extract_token(&req) {
                Some(TokenSource::Header(token)) => token,
                Some(TokenSource::QueryParam(token)) => {
                    issuer.audit().record(
                        AuditEntry::new(SecurityEvent::TokenFromQueryParam)
                            .with_detail("path", &path)
                            .with_detail("ip", &client_ip),
                    );
                    token
                }
                None => {
                    log::debug!("No bearer token on {} from {}", path, client_ip);
                    return Ok(req
                        .into_response(gate_rejection(None))
                        .map_into_right_body());
                }
            };

            let principal = match issuer.authenticate(&token) {
                Ok(principal) => principal,
                Err(error) => {
                    issuer.audit().record(
                        AuditEntry::new(SecurityEvent::GateRejection)
                            .with_detail("code", error.code())
                            .with_detail("path", &path)
                            .with_detail("ip", &client_ip),
                    );
                    return Ok(req
                        .into_response(gate_rejection(Some(&error)))
                        .map_into_right_body());
                }
            };

            log::debug!("Authenticated {} for {}", principal.username, path);
            issuer.audit().record(
                AuditEntry::new(SecurityEvent::GateAuthenticated)
                    .with_subject(&principal.username)
                    .with_detail("path", &path)
                    .with_detail("ip", &client_ip),
            );
            let remaining = principal.remaining_validity_at(Utc::now());
            if remaining < EXPIRING_SOON_SECONDS {
                issuer.audit().record(
                    AuditEntry::new(SecurityEvent::TokenExpiringSoon)
                        .with_subject(&principal.username)
                        .with_detail("remaining_seconds", remaining),
                );
            }

            let request = req.request().clone();
            req.extensions_mut().insert(AuthContext {
                principal,
                client_ip,
            });

            let result = service.call(req).await;

            // Runs for handler errors too
            request.extensions_mut().remove::<AuthContext>();

            result.map(ServiceResponse::map_into_left_body)
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum TokenSource {
    Header(String),
    QueryParam(String),
}

/// Whether a request bypasses the gate
pub fn is_exempt(method: &Method, path: &str) -> bool {
    *method == Method::OPTIONS || PUBLIC_PATHS.contains(&path)
}

fn extract_token(req: &ServiceRequest) -> Option<TokenSource> {
    if let Some(token) = extract_bearer_token(req.request()) {
        return Some(TokenSource::Header(token));
    }

    web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.get(TOKEN_QUERY_PARAM).cloned())
        .filter(|token| !token.trim().is_empty())
        .map(TokenSource::QueryParam)
}

/// Extracts the Bearer token from the Authorization header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Get client IP address from request
fn get_client_ip(req: &ServiceRequest) -> String {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            // First hop is the original client
            if let Some(ip) = forwarded_str.split(',').next() {
                if !ip.trim().is_empty() {
                    return ip.trim().to_string();
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.trim().to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| domain_error(DomainError::Auth(AuthError::AuthenticationRequired)));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
