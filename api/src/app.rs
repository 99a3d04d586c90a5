//! Application state and factory
//!
//! This module builds the shared services from configuration and provides
//! the factory for creating the Actix-web application.

use actix_web::{
    error::InternalError,
    http::StatusCode,
    middleware::Logger,
    web, App, HttpResponse,
};
use std::sync::Arc;
use td_core::{
    AuditService, DomainError, DynSessionIssuer, InMemoryRevocationStore, RevocationRegistry,
    SessionConfig, SessionIssuer, TokenCodec, TokenCodecConfig, UserDirectory,
};
use td_shared::{AuthConfig, CorsConfig};

use crate::dto::error::{error_codes, ErrorResponse, ErrorResponseExt};
use crate::middleware::{auth::AuthGate, cors::create_cors};
use crate::routes::{admin, auth};

/// State shared by every handler
pub struct AppState {
    pub session: Arc<DynSessionIssuer>,
    pub auth_config: AuthConfig,
}

impl AppState {
    /// Build the token codec, revocation registry and session issuer
    pub fn build(
        auth_config: AuthConfig,
        directory: Arc<dyn UserDirectory>,
        audit: AuditService,
    ) -> Result<Self, DomainError> {
        let codec = Arc::new(TokenCodec::new(TokenCodecConfig::from_jwt_config(
            &auth_config.jwt,
        )?)?);
        let registry = Arc::new(RevocationRegistry::new(
            Arc::new(InMemoryRevocationStore::new()),
            Arc::clone(&codec),
            audit.clone(),
            &auth_config.revocation,
        )?);
        let session = Arc::new(SessionIssuer::new(
            directory,
            codec,
            registry,
            audit,
            SessionConfig::from(&auth_config),
        ));

        Ok(Self {
            session,
            auth_config,
        })
    }

    pub fn registry(&self) -> &Arc<RevocationRegistry> {
        self.session.registry()
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let gate = AuthGate::new(Arc::clone(&app_state.session));

    App::new()
        .app_data(app_state)
        .app_data(json_config())
        // Innermost first: the gate sees requests after CORS and logging
        .wrap(gate)
        .wrap(create_cors(cors))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login::login))
                        .route("/refresh", web::post().to(auth::refresh::refresh))
                        .route("/validate", web::post().to(auth::validate::validate))
                        .route("/status", web::get().to(auth::status::status))
                        .route("/status", web::post().to(auth::status::status))
                        .route("/logout", web::post().to(auth::logout::logout))
                        .route("/config", web::get().to(auth::config::auth_config))
                        .route("/me", web::get().to(auth::me::me)),
                )
                .service(
                    web::scope("/admin").service(
                        web::resource("/revocations")
                            .route(web::get().to(admin::revocation_size))
                            .route(web::delete().to(admin::clear_revocations)),
                    ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies get the standard error body
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body")
            .to_response(StatusCode::BAD_REQUEST);
        InternalError::from_response(err, response).into()
    })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "taskdeck-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}
