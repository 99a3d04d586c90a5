//! Conversion of domain errors into HTTP responses.
//!
//! Token failures are told apart internally for auditing, but clients only
//! ever see one of a handful of stable error codes and a fixed message.

use actix_web::{error::InternalError, http::StatusCode, HttpResponse};
use td_core::{AuthError, DomainError, TokenError};
use validator::ValidationErrors;

use crate::dto::error::{error_codes, ErrorResponse, ErrorResponseExt};

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, body) = error_body(error);
    if status.is_server_error() {
        log::error!("Domain Error: {:?}", error);
    } else {
        log::debug!("Domain Error: {:?}", error);
    }
    body.to_response(status)
}

/// Same as [`handle_domain_error`], as an `actix_web::Error` for extractors
/// and guards
pub fn domain_error(error: DomainError) -> actix_web::Error {
    let response = handle_domain_error(&error);
    InternalError::from_response(error, response).into()
}

/// Response for a request the authentication gate turned away.
///
/// `None` means no token was presented at all.
pub fn gate_rejection(error: Option<&TokenError>) -> HttpResponse {
    let body = match error {
        None => ErrorResponse::new(
            error_codes::AUTHENTICATION_REQUIRED,
            "Authentication required",
        ),
        Some(error) => token_error_body(error),
    };
    body.to_response(StatusCode::UNAUTHORIZED)
}

/// 400 response listing the fields that failed validation
pub fn handle_validation_error(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();

    ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed")
        .add_detail("fields", fields)
        .to_response(StatusCode::BAD_REQUEST)
}

fn error_body(error: &DomainError) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(
                    error_codes::AUTHENTICATION_FAILED,
                    "Invalid username or password",
                ),
            ),
            AuthError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(
                    error_codes::AUTHENTICATION_REQUIRED,
                    "Authentication required",
                ),
            ),
            AuthError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(error_codes::FORBIDDEN, "Insufficient permissions"),
            ),
            AuthError::AuthDisabled => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::new(
                    error_codes::AUTH_DISABLED,
                    "JWT authentication is disabled, please use Basic Authentication instead",
                )
                .add_detail("authMethod", "Basic Auth"),
            ),
        },
        DomainError::Token(TokenError::GenerationFailed) => internal_error(),
        DomainError::Token(token_error) => {
            (StatusCode::UNAUTHORIZED, token_error_body(token_error))
        }
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::Internal { .. } => internal_error(),
    }
}

fn token_error_body(error: &TokenError) -> ErrorResponse {
    match error {
        TokenError::Expired => {
            ErrorResponse::new(error_codes::TOKEN_EXPIRED, "Token has expired")
        }
        TokenError::Revoked => {
            ErrorResponse::new(error_codes::TOKEN_REVOKED, "Token has been revoked")
        }
        TokenError::RefreshInvalid => {
            ErrorResponse::new(error_codes::REFRESH_FAILED, "Token refresh failed")
        }
        _ => ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid token"),
    }
}

fn internal_error() -> (StatusCode, ErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
    )
}
