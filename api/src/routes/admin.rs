//! Administrative endpoints over the revocation registry

use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::{RevocationClearedResponse, RevocationSizeResponse};
use crate::middleware::auth::AuthContext;

pub const ADMIN_ROLE: &str = "ADMIN";

/// Handler for GET /api/v1/admin/revocations
pub async fn revocation_size(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> actix_web::Result<HttpResponse> {
    auth.require_role(ADMIN_ROLE)?;

    Ok(HttpResponse::Ok().json(RevocationSizeResponse {
        size: state.session.registry().size(),
    }))
}

/// Handler for DELETE /api/v1/admin/revocations
///
/// Drops every revocation entry. Previously revoked tokens become usable
/// again until they expire.
pub async fn clear_revocations(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> actix_web::Result<HttpResponse> {
    auth.require_role(ADMIN_ROLE)?;

    let removed = state.session.registry().clear_all();
    log::warn!(
        "Revocation list cleared by {} from {} ({} entries)",
        auth.username(),
        auth.client_ip,
        removed
    );

    Ok(HttpResponse::Ok().json(RevocationClearedResponse {
        removed,
        message: "Revocation list cleared".to_string(),
    }))
}
