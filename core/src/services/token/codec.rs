//! Token codec: issues and parses signed, self-contained bearer tokens.
//!
//! Parsing always verifies the HMAC over `header.payload` before any segment
//! is decoded, so a change to any byte of a token surfaces as a signature
//! failure rather than as whatever the altered content happens to decode to.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, DecodingKey, EncodingKey, Header, Validation};
use std::collections::BTreeSet;
use tracing::warn;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};

use super::config::TokenCodecConfig;

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Stateless encoder/decoder for access and refresh tokens
pub struct TokenCodec {
    config: TokenCodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Same checks minus `exp`/`nbf`, for reading the expiry of old tokens
    expiry_validation: Validation,
}

impl TokenCodec {
    /// Creates a codec, refusing weak or non-HMAC configurations
    pub fn new(config: TokenCodecConfig) -> Result<Self, DomainError> {
        config.validate()?;

        if config.is_using_default_secret() {
            warn!("Token codec is using the built-in development secret");
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

        let mut expiry_validation = validation.clone();
        expiry_validation.validate_exp = false;
        expiry_validation.validate_nbf = false;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            expiry_validation,
        })
    }

    /// Configured lifetime for tokens of `kind`
    pub fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_lifetime,
            TokenKind::Refresh => self.config.refresh_lifetime,
        }
    }

    /// Issue a token of `kind` with the configured lifetime.
    ///
    /// `roles` are embedded in access tokens and ignored for refresh tokens.
    pub fn issue(
        &self,
        subject: &str,
        kind: TokenKind,
        roles: Option<&BTreeSet<String>>,
    ) -> Result<IssuedToken, TokenError> {
        self.issue_with_lifetime(subject, kind, roles, self.lifetime(kind))
    }

    /// Issue a token with an explicit lifetime
    pub fn issue_with_lifetime(
        &self,
        subject: &str,
        kind: TokenKind,
        roles: Option<&BTreeSet<String>>,
        lifetime: Duration,
    ) -> Result<IssuedToken, TokenError> {
        if subject.trim().is_empty() {
            return Err(TokenError::GenerationFailed);
        }

        let issued_at = Utc::now();
        if issued_at.checked_add_signed(lifetime).is_none() {
            warn!(
                lifetime_seconds = lifetime.num_seconds(),
                "Refusing to issue a token whose expiry overflows"
            );
            return Err(TokenError::GenerationFailed);
        }

        let claims = Claims::new(
            subject,
            kind,
            roles.cloned(),
            self.config.issuer.as_str(),
            issued_at,
            lifetime,
        );

        let header = Header::new(self.config.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify and decode a token.
    ///
    /// Order of checks: signature, structure and algorithm, then expiry.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_with(token, &self.validation)
    }

    /// Parse and require the token to be of `kind`
    pub fn parse_expecting(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let claims = self.parse(token)?;
        Self::expect_kind(&claims, kind)?;
        Ok(claims)
    }

    /// Whether `claims` were issued for `expected`
    pub fn validate_kind(claims: &Claims, expected: TokenKind) -> bool {
        claims.is_kind(expected)
    }

    pub fn expect_kind(claims: &Claims, expected: TokenKind) -> Result<(), TokenError> {
        if Self::validate_kind(claims, expected) {
            Ok(())
        } else {
            Err(TokenError::WrongKind {
                expected,
                actual: claims.token_type,
            })
        }
    }

    /// Expiry of a correctly signed token, whether or not it has passed
    pub fn read_expiry(&self, token: &str) -> Result<DateTime<Utc>, TokenError> {
        self.decode_with(token, &self.expiry_validation)
            .map(|claims| claims.expires_at())
    }

    /// Seconds of validity left for `claims`, never negative
    pub fn remaining_validity(claims: &Claims) -> i64 {
        claims.remaining_validity_at(Utc::now())
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Claims, TokenError> {
        let token = token.trim();
        self.verify_signature(token)?;

        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != self.config.algorithm {
            return Err(TokenError::Unsupported);
        }

        decode::<Claims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::Unsupported
                }
                _ => TokenError::Malformed,
            })
    }

    /// Check the HMAC over `header.payload` against the signature segment
    fn verify_signature(&self, token: &str) -> Result<(), TokenError> {
        let (message, signature) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
        if signature.is_empty() || message.split('.').count() != 2 {
            return Err(TokenError::Malformed);
        }

        match jsonwebtoken::crypto::verify(
            signature,
            message.as_bytes(),
            &self.decoding_key,
            self.config.algorithm,
        ) {
            Ok(true) => Ok(()),
            Ok(false) => Err(TokenError::SignatureInvalid),
            Err(_) => Err(TokenError::Malformed),
        }
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.config.algorithm)
            .field("issuer", &self.config.issuer)
            .field("access_lifetime", &self.config.access_lifetime)
            .field("refresh_lifetime", &self.config.refresh_lifetime)
            .finish_non_exhaustive()
    }
}
