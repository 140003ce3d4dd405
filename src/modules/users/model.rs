//! Request and response bodies for the account endpoints.
//!
//! Request fields default to empty strings when absent so that a missing field is
//! reported as a validation failure rather than a malformed body.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validator::{DeclaredFields, not_blank, well_formed_email};

pub const REGISTERED_MESSAGE: &str = "Compte créé avec succès !";

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Jeanne Martin")]
    pub full_name: String,

    #[serde(default)]
    #[validate(custom(function = "well_formed_email"))]
    #[schema(example = "jeanne@example.com")]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

impl DeclaredFields for RegisterRequest {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("full_name", "fullName"),
        ("email", "email"),
        ("password", "password"),
    ];
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "jeanne@example.com")]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

impl DeclaredFields for LoginRequest {
    const FIELDS: &'static [(&'static str, &'static str)] =
        &[("email", "email"), ("password", "password")];
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub email: String,
    pub authorities: Vec<String>,
}
