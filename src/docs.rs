use axum::Json;
use avisgate_core::ErrorBody;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::alerts::model::Alert;
use crate::modules::trends::model::WeeklyTrend;
use crate::modules::users::model::{
    LoginRequest, LoginResponse, MeResponse, MessageResponse, RegisterRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::home::welcome,
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::login_user,
        crate::modules::users::controller::get_me,
        crate::modules::alerts::controller::get_alerts,
        crate::modules::trends::controller::get_weekly_trends,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            MeResponse,
            Alert,
            WeeklyTrend,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Home", description = "Landing route"),
        (name = "Users", description = "Registration, login and the current principal"),
        (name = "Dashboard", description = "Alerts and weekly trends")
    ),
    info(
        title = "Mon Café Avis API",
        version = "0.1.0",
        description = "Customer feedback collection behind a stateless bearer-token gateway.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

/// Serves the OpenAPI document. Requires a token like any non-allowlisted route.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
