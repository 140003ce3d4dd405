#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use avisgate::router::init_router;
use avisgate::state::AppState;
use avisgate::store::InMemoryPrincipalStore;
use avisgate_auth::TokenService;
use avisgate_config::{CorsConfig, JwtConfig};
use avisgate_core::{BcryptHasher, CredentialHasher, Principal};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret-key-at-least-32-bytes";
pub const USER_EMAIL: &str = "a@b.com";
pub const ADMIN_EMAIL: &str = "admin@b.com";
pub const PASSWORD: &str = "ABCD1234";
pub const ALLOWED_ORIGIN: &str = "http://localhost:8080";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(SECRET, Duration::from_secs(3600)).unwrap()
}

/// State with two accounts sharing [`PASSWORD`]; only the admin holds `ADMIN`.
pub fn test_state() -> AppState {
    let hasher = BcryptHasher::with_cost(4);
    let hash = hasher.hash(PASSWORD).unwrap();
    let store = InMemoryPrincipalStore::with_principals([
        Principal::new(USER_EMAIL, hash.clone()).with_full_name("Alice"),
        Principal::new(ADMIN_EMAIL, hash).with_authority("ADMIN"),
    ]);

    AppState::new(
        &jwt_config(),
        CorsConfig {
            allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
        },
        Arc::new(store),
        Arc::new(hasher),
    )
    .unwrap()
}

pub fn test_app() -> Router {
    init_router(test_state())
}

pub fn token_for(email: &str) -> String {
    TokenService::new(&jwt_config())
        .issue(&Principal::new(email, "unused"))
        .unwrap()
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

/// Asserts the uniform error shape and returns the message.
pub fn assert_error_body(body: &Value, status: StatusCode, path: &str) -> String {
    let object = body.as_object().expect("error body is an object");
    assert_eq!(object.len(), 5, "unexpected fields in {}", body);
    assert_eq!(body["status"], status.as_u16());
    assert_eq!(body["error"], status.canonical_reason().unwrap());
    assert_eq!(body["path"], path);

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'));
    chrono::DateTime::parse_from_rfc3339(timestamp).unwrap();

    body["message"].as_str().unwrap().to_string()
}
