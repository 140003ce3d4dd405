use axum::{Json, extract::State};
use avisgate_core::{AppError, ErrorBody};
use tracing::instrument;

use super::model::{LoginRequest, LoginResponse, MeResponse, MessageResponse, RegisterRequest};
use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create an account
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Malformed body, validation failure or email already used", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(UserService::register(&state, dto).await?))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body or validation failure", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(UserService::login(&state, dto).await?))
}

/// The authenticated principal
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current principal", body = MeResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_me(AuthUser(principal): AuthUser) -> Json<MeResponse> {
    Json(UserService::me(&principal))
}
