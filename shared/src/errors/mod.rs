//! Shared error body and error codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes returned in `ErrorResponse::error`
pub mod error_codes {
    /// No usable credential was presented
    pub const AUTHENTICATION_REQUIRED: &str = "authentication_required";
    /// Credentials were presented and rejected
    pub const AUTHENTICATION_FAILED: &str = "authentication_failed";
    /// Authenticated, but lacking the required role
    pub const FORBIDDEN: &str = "forbidden";
    pub const AUTH_DISABLED: &str = "auth_disabled";
    pub const TOKEN_EXPIRED: &str = "token_expired";
    pub const TOKEN_INVALID: &str = "token_invalid";
    pub const TOKEN_REVOKED: &str = "token_revoked";
    pub const REFRESH_FAILED: &str = "refresh_failed";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const NOT_FOUND: &str = "not_found";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization_omits_empty_details() {
        let response = ErrorResponse::new(error_codes::TOKEN_EXPIRED, "Token has expired");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "token_expired");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::new(error_codes::AUTH_DISABLED, "disabled")
            .add_detail("authMethod", "Basic Auth");
        let details = response.details.unwrap();
        assert_eq!(details["authMethod"], "Basic Auth");
    }
}
