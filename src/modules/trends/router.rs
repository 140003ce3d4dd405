use axum::{Router, routing::get};

use super::controller::get_weekly_trends;

pub fn init_trends_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/weekly", get(get_weekly_trends))
}
