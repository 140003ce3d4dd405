//! Token issuing and validation.
//!
//! Validation is split in two steps to match the authentication flow:
//!
//! 1. [`TokenService::extract_subject`] checks structure and signature only, so
//!    the caller can look the principal up.
//! 2. [`TokenService::is_valid`] checks expiry and that the subject is the
//!    principal that was found.
//!
//! Both steps re-verify the signature. Expiry is compared against an explicit
//! instant in the `*_at` variants.

use std::fmt;
use std::time::Duration;

use avisgate_config::JwtConfig;
use avisgate_core::{AppError, AuthFailure, Principal};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::Claims;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token structure or signature is invalid")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token is not valid for this principal")]
    Invalid,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => AuthFailure::TokenMalformed.into(),
            TokenError::Expired => AuthFailure::TokenExpired.into(),
            TokenError::Invalid => AuthFailure::TokenInvalid.into(),
            TokenError::Signing(detail) => AppError::internal(anyhow::anyhow!(detail)),
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_at` against an explicit clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.token_ttl,
        }
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, TokenError> {
        self.issue_at(principal, Utc::now())
    }

    pub fn issue_at(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

        let claims = Claims {
            sub: principal.identifier.clone(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Returns the subject of a correctly signed token, expired or not.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token)
            .map(|claims| claims.sub)
            .map_err(|_| TokenError::Malformed)
    }

    pub fn is_valid(&self, token: &str, principal: &Principal) -> Result<(), TokenError> {
        self.validate_at(token, principal, Utc::now())
    }

    pub fn validate_at(
        &self,
        token: &str,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<(), TokenError> {
        let claims = self.decode(token).map_err(|_| TokenError::Invalid)?;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        if claims.sub != principal.identifier {
            return Err(TokenError::Invalid);
        }

        Ok(())
    }

    fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
