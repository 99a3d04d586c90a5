use actix_web::{web, HttpResponse};

use crate::dto::auth::AuthConfigResponse;

use super::AppState;

const TOKEN_ENDPOINTS: &[&str] = &[
    "/api/v1/auth/login",
    "/api/v1/auth/refresh",
    "/api/v1/auth/validate",
    "/api/v1/auth/status",
    "/api/v1/auth/logout",
];

/// Handler for GET /api/v1/auth/config
///
/// Tells clients which authentication method to use.
pub async fn auth_config(state: web::Data<AppState>) -> HttpResponse {
    let response = if state.session.is_enabled() {
        AuthConfigResponse {
            jwt_enabled: true,
            authentication_method: "JWT".to_string(),
            jwt_endpoints: TOKEN_ENDPOINTS.iter().map(|path| path.to_string()).collect(),
            message: "JWT Authentication is enabled".to_string(),
        }
    } else {
        AuthConfigResponse {
            jwt_enabled: false,
            authentication_method: "Basic Auth".to_string(),
            jwt_endpoints: vec!["Use HTTP Basic Authentication".to_string()],
            message: "Basic Authentication is enabled".to_string(),
        }
    };

    HttpResponse::Ok().json(response)
}
