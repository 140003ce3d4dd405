use axum::Json;
use avisgate_core::ErrorBody;
use chrono::Utc;

use super::model::{Alert, current_alerts};

/// Dashboard alerts
#[utoipa::path(
    get,
    path = "/api/alerts",
    responses(
        (status = 200, description = "Current alerts", body = [Alert]),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_alerts() -> Json<Vec<Alert>> {
    Json(current_alerts(Utc::now()))
}
