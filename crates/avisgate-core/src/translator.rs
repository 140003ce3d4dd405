//! The error translator.
//!
//! [`classify`] maps every [`AppError`] to a status and a caller-safe message.
//! [`translate_errors`] is the outermost middleware of the router: when a
//! response carries an [`ApiFailure`] it replaces the body with an [`ErrorBody`]
//! stamped with the request path and the current instant.
//!
//! ```text
//! {"timestamp":"2026-10-19T08:00:00.000Z","status":401,"error":"Unauthorized",
//!  "message":"Invalid or expired token","path":"/api/avis"}
//! ```

use std::any::Any;

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AuthFailure};

pub const MALFORMED_BODY_MESSAGE: &str = "Malformed JSON request";
pub const VALIDATION_PREFIX: &str = "Validation failed: ";
pub const TOKEN_REJECTED_MESSAGE: &str = "Invalid or expired token";
pub const AUTHENTICATION_FAILED_MESSAGE: &str = "Authentication failed";
pub const BAD_CREDENTIALS_MESSAGE: &str = "Email ou mot de passe incorrect";
pub const EMAIL_TAKEN_MESSAGE: &str = "Email déjà utilisé.";
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied";
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// What the caller is allowed to learn about a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

pub fn classify(err: &AppError) -> ApiFailure {
    match err {
        AppError::MalformedBody(_) => ApiFailure::new(StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE),
        AppError::Validation(violations) => {
            let details = violations
                .iter()
                .map(|v| format!("{}: {}", v.field, v.reason))
                .collect::<Vec<_>>()
                .join(", ");
            ApiFailure::new(
                StatusCode::BAD_REQUEST,
                format!("{}{}", VALIDATION_PREFIX, details),
            )
        }
        AppError::Authentication(reason) => ApiFailure::new(
            StatusCode::UNAUTHORIZED,
            authentication_message(*reason),
        ),
        AppError::InvalidCredentials => {
            ApiFailure::new(StatusCode::UNAUTHORIZED, BAD_CREDENTIALS_MESSAGE)
        }
        AppError::EmailTaken => ApiFailure::new(StatusCode::BAD_REQUEST, EMAIL_TAKEN_MESSAGE),
        AppError::AccessDenied(_) => ApiFailure::new(StatusCode::FORBIDDEN, ACCESS_DENIED_MESSAGE),
        AppError::Internal(_) => {
            ApiFailure::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

fn authentication_message(reason: AuthFailure) -> &'static str {
    match reason {
        AuthFailure::TokenMalformed
        | AuthFailure::TokenExpired
        | AuthFailure::TokenInvalid
        | AuthFailure::PrincipalNotFound => TOKEN_REJECTED_MESSAGE,
        AuthFailure::MissingCredential => AUTHENTICATION_FAILED_MESSAGE,
    }
}

/// Wire shape of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// ISO-8601 UTC instant
    pub timestamp: String,
    pub status: u16,
    /// Reason phrase of `status`
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorBody {
    pub fn new(failure: &ApiFailure, path: &str, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: failure.status.as_u16(),
            error: failure
                .status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
            message: failure.message.clone(),
            path: path.to_string(),
        }
    }
}

pub fn render(failure: &ApiFailure, path: &str) -> Response {
    let body = ErrorBody::new(failure, path, Utc::now());
    (failure.status, Json(body)).into_response()
}

/// Outermost middleware: renders the uniform body for any failed response.
pub async fn translate_errors(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    let Some(failure) = response.extensions().get::<ApiFailure>().cloned() else {
        return response;
    };

    // Headers set by outer layers (CORS, request id) survive the new body.
    let (parts, _) = response.into_parts();
    let mut rendered = render(&failure, &path);
    for (name, value) in parts.headers.iter() {
        if name == header::CONTENT_TYPE || name == header::CONTENT_LENGTH {
            continue;
        }
        rendered.headers_mut().append(name.clone(), value.clone());
    }
    rendered
}

/// Handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}
