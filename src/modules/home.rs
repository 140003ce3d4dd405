use axum::{Router, routing::get};

pub const WELCOME_MESSAGE: &str = "Welcome to Mon Café Avis !";

/// Public landing route.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = String)),
    tag = "Home"
)]
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

pub fn init_home_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(welcome))
}
