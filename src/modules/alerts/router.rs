use axum::{Router, routing::get};

use super::controller::get_alerts;

pub fn init_alerts_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(get_alerts))
}
