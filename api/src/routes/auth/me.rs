use actix_web::HttpResponse;

use crate::dto::auth::PrincipalResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the principal the gate bound to this request.
pub async fn me(auth: AuthContext) -> HttpResponse {
    let principal = auth.principal;
    HttpResponse::Ok().json(PrincipalResponse {
        authorities: principal.authorities(),
        username: principal.username,
        roles: principal.roles,
        token_expires_at: principal.expires_at,
    })
}
