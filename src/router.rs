use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use avisgate_config::CorsConfig;
use avisgate_core::translator::{panic_response, translate_errors};
use avisgate_observability::logging_middleware;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::docs::openapi_json;
use crate::middleware::access::enforce_access_policy;
use crate::middleware::auth::authenticate;
use crate::modules::alerts::router::init_alerts_router;
use crate::modules::home::init_home_router;
use crate::modules::reviews::router::init_reviews_router;
use crate::modules::trends::router::init_trends_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let routes = api_routes(&state);
    apply_security_layers(routes, state)
}

pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(init_home_router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest(
            "/api",
            Router::new()
                .nest("/users", init_users_router())
                .nest("/feedback", init_reviews_router(state.feedback.clone()))
                .nest("/avis", init_reviews_router(state.avis.clone()))
                .nest("/alerts", init_alerts_router())
                .nest("/trends", init_trends_router()),
        )
}

/// Wraps `router` in the request pipeline, innermost first:
/// access policy, authentication, panic capture, CORS, request logging, error translation.
///
/// Every route added to `router`, and the fallback, is covered.
pub fn apply_security_layers(router: Router<AppState>, state: AppState) -> Router {
    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_access_policy,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(translate_errors))
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
