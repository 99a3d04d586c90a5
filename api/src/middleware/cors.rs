//! Cross-origin policy for browser clients.
//!
//! A `*` entry in `allowed_origins` accepts any origin and allows
//! credentials; otherwise only the listed origins get CORS headers.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use td_shared::CorsConfig;

/// Build the CORS middleware for `config`
pub fn create_cors(config: &CorsConfig) -> Cors {
    let base = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allowed_headers([header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers([header::AUTHORIZATION])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("CORS: accepting any origin");
        return base.allow_any_origin().supports_credentials();
    }

    log::info!("CORS: {} allowed origin(s)", config.allowed_origins.len());
    config
        .allowed_origins
        .iter()
        .fold(base, |cors, origin| cors.allowed_origin(origin))
}
