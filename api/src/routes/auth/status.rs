use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::StatusResponse;
use crate::middleware::auth::{extract_bearer_token, OptionalAuth};

use super::AppState;

/// Handler for GET|POST /api/v1/auth/status
///
/// Always 200. The path is public, so the bearer token (if any) is checked
/// here; a context bound by an outer authentication layer wins.
pub async fn status(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: OptionalAuth,
) -> HttpResponse {
    let principal = match auth.0 {
        Some(context) => Some(context.principal),
        None if state.session.is_enabled() => extract_bearer_token(&req)
            .and_then(|token| state.session.authenticate(&token).ok()),
        None => None,
    };

    let response = match principal {
        Some(principal) => StatusResponse {
            authenticated: true,
            authorities: Some(principal.authorities()),
            username: Some(principal.username),
            message: None,
        },
        None => StatusResponse {
            authenticated: false,
            username: None,
            authorities: None,
            message: Some("User not authenticated".to_string()),
        },
    };

    HttpResponse::Ok().json(response)
}
