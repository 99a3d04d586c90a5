use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_error};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a valid refresh token for a new access token. The refresh
/// token itself is returned unchanged.
///
/// # Request Body
///
/// ```json
/// {
///     "refreshToken": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired, revoked or non-refresh token
/// - 405 Method Not Allowed: Token authentication is disabled
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state.session.refresh(&request.refresh_token).await {
        Ok(auth_response) => HttpResponse::Ok().json(TokenResponse::from(auth_response)),
        Err(error) => handle_domain_error(&error),
    }
}
