//! Request body extractors.
//!
//! All of them reject with [`AppError`] so that body problems reach the client in the
//! uniform error shape: unparsable JSON is a `MalformedBody`, rule violations are a
//! `Validation` listing `field: reason` pairs in field declaration order.

use std::borrow::Cow;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
};
use avisgate_core::{AppError, FieldViolation};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

/// Field order of a request DTO, as `(rust name, wire name)` pairs.
///
/// Violations are reported in this order under their wire names.
pub trait DeclaredFields {
    const FIELDS: &'static [(&'static str, &'static str)];
}

pub fn collect_violations<T: DeclaredFields>(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let field_errors = errors.field_errors();
    let mut violations = Vec::new();

    for (rust_name, wire_name) in T::FIELDS {
        if let Some(errors) = field_errors.get(*rust_name) {
            violations.extend(errors.iter().map(|e| FieldViolation::new(*wire_name, reason(e))));
        }
    }

    let mut undeclared: Vec<(&str, &Vec<ValidationError>)> = field_errors
        .iter()
        .map(|(name, errors)| (&**name, *errors))
        .filter(|(name, _)| !T::FIELDS.iter().any(|(rust_name, _)| name == rust_name))
        .collect();
    undeclared.sort_by(|a, b| a.0.cmp(b.0));
    for (name, errors) in undeclared {
        violations.extend(errors.iter().map(|e| FieldViolation::new(name, reason(e))));
    }

    violations
}

fn reason(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Blank values report as blank, not as badly formed.
pub fn well_formed_email(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if !value.validate_email() {
        return Err(ValidationError::new("email")
            .with_message(Cow::Borrowed("must be a well-formed email address")));
    }
    Ok(())
}

/// JSON body that is deserialized, then validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + DeclaredFields,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(collect_violations::<T>(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// JSON body without validation rules, e.g. opaque review records.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameter whose parse failure is a validation error.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct PathParam<T>(pub T);
