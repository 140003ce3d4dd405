mod common;

use std::sync::Arc;

use avisgate::router::init_router;
use avisgate::state::AppState;
use avisgate::store::InMemoryPrincipalStore;
use avisgate_auth::TokenService;
use avisgate_config::CorsConfig;
use avisgate_core::{BcryptHasher, Principal};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use serde_json::json;

fn login_body(email: &str, password: &str) -> String {
    json!({ "email": email, "password": password }).to_string()
}

#[tokio::test]
async fn test_login_success_returns_token_for_subject() {
    let app = test_app();

    let (status, body) = send(
        &app,
        request("POST", "/api/users/login", None, Some(&login_body(USER_EMAIL, PASSWORD))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], USER_EMAIL);
    let token = body["token"].as_str().unwrap();
    let subject = TokenService::new(&jwt_config()).extract_subject(token).unwrap();
    assert_eq!(subject, USER_EMAIL);

    let (status, body) = send(&app, request("GET", "/api/users/me", Some(token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], USER_EMAIL);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = test_app();

    let (status, body) = send(
        &app,
        request("POST", "/api/users/login", None, Some(&login_body(USER_EMAIL, "wrong"))),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let message = assert_error_body(&body, StatusCode::UNAUTHORIZED, "/api/users/login");
    assert_eq!(message, "Email ou mot de passe incorrect");
}

#[tokio::test]
async fn test_login_unknown_email_is_indistinguishable() {
    let app = test_app();

    let (status, unknown) = send(
        &app,
        request("POST", "/api/users/login", None, Some(&login_body("nobody@b.com", PASSWORD))),
    )
    .await;
    let (_, wrong) = send(
        &app,
        request("POST", "/api/users/login", None, Some(&login_body(USER_EMAIL, "wrong"))),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown["message"], wrong["message"]);
    assert_eq!(unknown["error"], wrong["error"]);
}

#[tokio::test]
async fn test_login_validation() {
    let app = test_app();

    let (status, body) = send(
        &app,
        request("POST", "/api/users/login", None, Some(r#"{"email":"not-an-email"}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = assert_error_body(&body, StatusCode::BAD_REQUEST, "/api/users/login");
    assert_eq!(message, "Validation failed: password: must not be blank");
}

#[tokio::test]
async fn test_login_with_non_email_identifier_is_bad_credentials() {
    let app = test_app();

    let (status, body) = send(
        &app,
        request("POST", "/api/users/login", None, Some(&login_body("not-an-email", PASSWORD))),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let message = assert_error_body(&body, StatusCode::UNAUTHORIZED, "/api/users/login");
    assert_eq!(message, "Email ou mot de passe incorrect");
}

#[tokio::test]
async fn test_login_against_unreadable_stored_hash_is_bad_credentials() {
    let hasher = BcryptHasher::with_cost(4);
    let store = InMemoryPrincipalStore::with_principals([
        Principal::new("legacy@b.com", "not-a-bcrypt-hash"),
    ]);
    let state = AppState::new(
        &jwt_config(),
        CorsConfig {
            allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
        },
        Arc::new(store),
        Arc::new(hasher),
    )
    .unwrap();
    let app = init_router(state);

    let (status, body) = send(
        &app,
        request("POST", "/api/users/login", None, Some(&login_body("legacy@b.com", PASSWORD))),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let message = assert_error_body(&body, StatusCode::UNAUTHORIZED, "/api/users/login");
    assert_eq!(message, "Email ou mot de passe incorrect");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = test_app();

    for uri in ["/api/users/login", "/api/users/register", "/api/feedback"] {
        let (status, body) = send(&app, request("POST", uri, None, Some(r#"{"email": "#))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "Malformed JSON request");
        assert_error_body(&body, StatusCode::BAD_REQUEST, uri);
    }
}

#[tokio::test]
async fn test_missing_content_type_is_malformed() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/users/login")
        .body(Body::from(login_body(USER_EMAIL, PASSWORD)))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Malformed JSON request");
}

#[tokio::test]
async fn test_register_then_login() {
    let app = test_app();
    let payload = json!({
        "fullName": "Jeanne Martin",
        "email": "jeanne@example.com",
        "password": "s3cret-pass"
    })
    .to_string();

    let (status, body) = send(&app, request("POST", "/api/users/register", None, Some(&payload))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Compte créé avec succès !" }));

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/users/login",
            None,
            Some(&login_body("jeanne@example.com", "s3cret-pass")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "jeanne@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = test_app();
    let payload = json!({ "fullName": "Alice", "email": USER_EMAIL, "password": "x" }).to_string();

    let (status, body) = send(&app, request("POST", "/api/users/register", None, Some(&payload))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = assert_error_body(&body, StatusCode::BAD_REQUEST, "/api/users/register");
    assert_eq!(message, "Email déjà utilisé.");
}

#[tokio::test]
async fn test_register_reports_fields_in_declaration_order() {
    let app = test_app();
    let payload = json!({ "password": "", "email": "bad", "fullName": " " }).to_string();

    let (status, body) = send(&app, request("POST", "/api/users/register", None, Some(&payload))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Validation failed: fullName: must not be blank, \
         email: must be a well-formed email address, \
         password: must not be blank"
    );
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = test_app();

    let (status, body) = send(&app, request("GET", "/api/users/me", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication failed");
}

#[tokio::test]
async fn test_me_lists_authorities() {
    let app = test_app();
    let token = token_for(ADMIN_EMAIL);

    let (_, body) = send(&app, request("GET", "/api/users/me", Some(&token), None)).await;

    assert_eq!(body, json!({ "email": ADMIN_EMAIL, "authorities": ["ADMIN"] }));
}
