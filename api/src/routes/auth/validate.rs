use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::ValidateResponse;
use crate::middleware::auth::extract_bearer_token;

use super::AppState;

/// Handler for POST /api/v1/auth/validate
///
/// Reports whether the bearer token in the Authorization header would be
/// accepted right now. Applies the same kind and revocation checks as the
/// authentication gate, without changing any state.
///
/// ## Responses
/// - 200 OK: `{"valid": true, "username": "...", "remainingValiditySeconds": 812}`
/// - 400 Bad Request: Authorization header missing or not a Bearer header
/// - 401 Unauthorized: `{"valid": false, "message": "Invalid or expired token"}`
pub async fn validate(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let Some(token) = extract_bearer_token(&req) else {
        return HttpResponse::BadRequest().json(ValidateResponse::rejected(
            "Authorization header missing or invalid format",
        ));
    };

    let introspection = state.session.introspect(&token);
    if introspection.valid {
        HttpResponse::Ok().json(ValidateResponse::from(introspection))
    } else {
        HttpResponse::Unauthorized().json(ValidateResponse::from(introspection))
    }
}
