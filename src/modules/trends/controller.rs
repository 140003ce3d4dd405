use axum::Json;
use avisgate_core::ErrorBody;

use super::model::WeeklyTrend;

/// Ratings and feedback volume for the current week
#[utoipa::path(
    get,
    path = "/api/trends/weekly",
    responses(
        (status = 200, description = "Weekly trend", body = WeeklyTrend),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_weekly_trends() -> Json<WeeklyTrend> {
    Json(WeeklyTrend::current())
}
