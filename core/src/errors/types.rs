//! Error types for authentication and token handling
//!
//! Every variant is distinguished internally so it can be audited with the
//! right severity. The presentation layer collapses them into the client
//! facing outcomes (authentication required, authentication failed,
//! forbidden, disabled).

use thiserror::Error;

use crate::domain::entities::audit::{SecurityEvent, Severity};
use crate::domain::entities::token::TokenKind;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown user and wrong secret are deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token authentication is disabled")]
    AuthDisabled,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Unsupported token")]
    Unsupported,

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongKind { expected: TokenKind, actual: TokenKind },

    #[error("Token revoked")]
    Revoked,

    #[error("Invalid refresh token")]
    RefreshInvalid,

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Audit severity of this failure
    pub fn severity(&self) -> Severity {
        match self {
            Self::Expired | Self::NotYetValid => Severity::Low,
            Self::SignatureInvalid | Self::Revoked => Severity::High,
            Self::Malformed
            | Self::Unsupported
            | Self::WrongKind { .. }
            | Self::RefreshInvalid
            | Self::GenerationFailed => Severity::Medium,
        }
    }

    /// Audit event recorded for this failure
    pub fn event(&self) -> SecurityEvent {
        match self {
            Self::Malformed | Self::NotYetValid => SecurityEvent::MalformedToken,
            Self::SignatureInvalid => SecurityEvent::SignatureInvalid,
            Self::Expired => SecurityEvent::TokenExpired,
            Self::Unsupported => SecurityEvent::UnsupportedToken,
            Self::WrongKind { .. } => SecurityEvent::WrongTokenKind,
            Self::Revoked => SecurityEvent::RevokedTokenReuse,
            Self::RefreshInvalid | Self::GenerationFailed => SecurityEvent::RefreshFailure,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed => "TOKEN_MALFORMED",
            Self::SignatureInvalid => "TOKEN_SIGNATURE_INVALID",
            Self::Expired => "TOKEN_EXPIRED",
            Self::NotYetValid => "TOKEN_NOT_YET_VALID",
            Self::Unsupported => "TOKEN_UNSUPPORTED",
            Self::WrongKind { .. } => "TOKEN_WRONG_KIND",
            Self::Revoked => "TOKEN_REVOKED",
            Self::RefreshInvalid => "REFRESH_INVALID",
            Self::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}
