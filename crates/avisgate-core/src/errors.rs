//! Failure taxonomy for request processing.
//!
//! Every way a request can fail is one variant of [`AppError`]. Authentication
//! failures carry an [`AuthFailure`] reason that is logged but never returned to
//! the caller: all of them collapse into the same 401 so a client cannot tell
//! an expired token from an unknown account.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use crate::translator::{self, ApiFailure};

/// Why authentication of a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("token is malformed or its signature does not verify")]
    TokenMalformed,
    #[error("token has expired")]
    TokenExpired,
    #[error("token does not belong to the resolved principal")]
    TokenInvalid,
    #[error("no principal matches the token subject")]
    PrincipalNotFound,
    #[error("no credential was presented for a protected route")]
    MissingCredential,
}

/// A single field-level validation problem, e.g. `email: must be a well-formed email address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthFailure),

    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("email already registered")]
    EmailTaken,

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn access_denied(detail: impl Into<String>) -> Self {
        Self::AccessDenied(detail.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        debug!(detail = %rejection.body_text(), "Path parameter rejected");
        Self::Validation(vec![FieldViolation::new("id", "must be a number")])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(err) => error!(error = ?err, "Unhandled error"),
            AppError::Authentication(reason) => debug!(reason = %reason, "Authentication failed"),
            other => debug!(error = %other, "Request rejected"),
        }

        // The body is rendered by the translator middleware, which knows the request path.
        let failure: ApiFailure = translator::classify(&self);
        let mut response = failure.status.into_response();
        response.extensions_mut().insert(failure);
        response
    }
}
