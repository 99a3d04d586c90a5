use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_error};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Verifies the credentials and returns an access/refresh token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "password": "secret"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ...",
///     "tokenType": "Bearer",
///     "username": "alice",
///     "roles": ["USER"],
///     "expiresIn": 900,
///     "issuedAt": "2024-01-01T00:00:00Z",
///     "expiresAt": "2024-01-01T00:15:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing username or password
/// - 401 Unauthorized: Invalid credentials
/// - 405 Method Not Allowed: Token authentication is disabled
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .session
        .login(&request.username, &request.password)
        .await
    {
        Ok(auth_response) => HttpResponse::Ok().json(TokenResponse::from(auth_response)),
        Err(error) => handle_domain_error(&error),
    }
}
