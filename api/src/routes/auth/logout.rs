use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::{LogoutRequest, LogoutResponse};
use crate::middleware::auth::extract_bearer_token;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the access token from the Authorization header and, when given,
/// the refresh token from the body. Succeeds whatever state the tokens are
/// in, including when none is presented.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Request Body (optional)
///
/// ```json
/// {
///     "refreshToken": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logout successful"
/// }
/// ```
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<LogoutRequest>>,
) -> HttpResponse {
    let refresh_token = body.and_then(|body| body.into_inner().refresh_token);

    if state.session.is_enabled() {
        match extract_bearer_token(&req) {
            Some(access_token) => {
                let summary = state
                    .session
                    .logout(&access_token, refresh_token.as_deref());
                log::debug!("Logout summary: {:?}", summary);
            }
            None => {
                if let Some(refresh_token) = refresh_token.as_deref() {
                    state.session.registry().revoke(refresh_token);
                }
            }
        }
    }

    HttpResponse::Ok().json(LogoutResponse {
        message: "Logout successful".to_string(),
    })
}
