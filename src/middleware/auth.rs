use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Extensions, HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use avisgate_core::{AppError, AuthFailure, Principal};
use tracing::debug;

use crate::state::AppState;

/// The only accepted scheme. Matching is case-sensitive.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Who is making the current request. Lives in the request extensions only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestIdentity {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl RequestIdentity {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(principal) => Some(principal),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Extractor for handlers that need an authenticated principal.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.identifier
    }

    pub fn require_authority(&self, authority: &str) -> Result<(), AppError> {
        if self.0.has_authority(authority) {
            Ok(())
        } else {
            Err(AppError::access_denied(format!(
                "{} lacks authority {}",
                self.0.identifier, authority
            )))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<RequestIdentity>() {
            Some(RequestIdentity::Authenticated(principal)) => Ok(AuthUser(principal.clone())),
            _ => Err(AuthFailure::MissingCredential.into()),
        }
    }
}

/// The token of an `Authorization: Bearer <token>` header.
///
/// `Ok(None)` only for a missing header or another scheme. A `Bearer ` header whose
/// token is not UTF-8 is a malformed token.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthFailure> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let Some(token) = value.as_bytes().strip_prefix(BEARER_PREFIX.as_bytes()) else {
        return Ok(None);
    };

    std::str::from_utf8(token)
        .map(Some)
        .map_err(|_| AuthFailure::TokenMalformed)
}

/// Authentication middleware. A presented bearer token that fails validation
/// ends the request with 401, even on public routes.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    establish_identity(&state, &parts.headers, &mut parts.extensions).await?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

async fn establish_identity(
    state: &AppState,
    headers: &HeaderMap,
    extensions: &mut Extensions,
) -> Result<(), AppError> {
    let Some(token) = bearer_token(headers)? else {
        if extensions.get::<RequestIdentity>().is_none() {
            extensions.insert(RequestIdentity::Anonymous);
        }
        return Ok(());
    };

    let subject = state.tokens.extract_subject(token)?;

    // Set at most once per request.
    if matches!(
        extensions.get::<RequestIdentity>(),
        Some(RequestIdentity::Authenticated(_))
    ) {
        return Ok(());
    }

    let principal = state.resolver.resolve(&subject).await?;
    state.tokens.is_valid(token, &principal)?;

    debug!(principal = %principal.identifier, "Request authenticated");
    extensions.insert(RequestIdentity::Authenticated(principal));
    Ok(())
}
