use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::integration::common::{TEST_PASSWORD, TEST_USERNAME, setup_test_app};

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app().await;

    let (status, json) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/api/goals/join/"]["post"].is_object());
    assert!(json["components"]["securitySchemes"]["bearer"].is_object());
}

#[tokio::test]
async fn login_returns_token_pair() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/token/",
            None,
            Some(json!({"username": TEST_USERNAME, "password": TEST_PASSWORD})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["access"].is_string());
    assert!(json["refresh"].is_string());
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/token/",
            None,
            Some(json!({"username": TEST_USERNAME, "password": "not-the-password"})),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        json["detail"],
        "No active account found with the given credentials"
    );
}

#[tokio::test]
async fn refresh_returns_new_access_token() {
    let app = setup_test_app().await;
    let (_, pair) = app
        .send(
            Method::POST,
            "/api/token/",
            None,
            Some(json!({"username": TEST_USERNAME, "password": TEST_PASSWORD})),
        )
        .await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/token/refresh/",
            None,
            Some(json!({"refresh": pair["refresh"]})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let access = json["access"].as_str().unwrap();

    let (status, _) = app.get("/api/dashboard/", access).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_and_refresh_accept_form_bodies() {
    let app = setup_test_app().await;

    let (status, pair) = app
        .post_form(
            "/api/token/",
            &format!("username={TEST_USERNAME}&password={TEST_PASSWORD}"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(pair["access"].is_string());
    let refresh = pair["refresh"].as_str().unwrap();

    let (status, json) = app
        .post_form("/api/token/refresh/", &format!("refresh={refresh}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["access"].is_string());

    let (status, json) = app
        .post_form("/api/token/", &format!("username={TEST_USERNAME}&password=wrong-pass"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        json["detail"],
        "No active account found with the given credentials"
    );
}

#[tokio::test]
async fn deactivated_user_loses_access_immediately() {
    let app = setup_test_app().await;
    let token = app.login_test_user().await;

    let (status, _) = app.get("/api/dashboard/", &token).await;
    assert_eq!(status, StatusCode::OK);

    sqlx::query("UPDATE users SET is_active = FALSE WHERE username = $1")
        .bind(TEST_USERNAME)
        .execute(app.state.db.pool())
        .await
        .unwrap();

    let (status, json) = app.get("/api/dashboard/", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["detail"], "User is inactive");
}

#[tokio::test]
async fn refresh_with_access_token_returns_401() {
    let app = setup_test_app().await;
    let access = app.login_test_user().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/token/refresh/",
            None,
            Some(json!({"refresh": access})),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["detail"], "Token is invalid or expired");
}

#[tokio::test]
async fn missing_credentials_returns_401() {
    let app = setup_test_app().await;

    let (status, json) = app.send(Method::GET, "/api/dashboard/", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "not_authenticated");
    assert_eq!(
        json["detail"],
        "Authentication credentials were not provided."
    );
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = setup_test_app().await;

    let (status, json) = app.get("/api/goals/", "not-a-jwt").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["detail"], "Given token not valid for any token type");
}

#[tokio::test]
async fn register_then_login() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/register/",
            None,
            Some(json!({"username": "newcomer", "password": "s3cure-pass", "email": "new@example.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["username"], "newcomer");
    assert_eq!(json["email"], "new@example.com");
    assert!(json.get("password_hash").is_none());

    app.login("newcomer", "s3cure-pass").await;
}

#[tokio::test]
async fn duplicate_registration_returns_409() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/register/",
            None,
            Some(json!({"username": TEST_USERNAME, "password": "another-pass"})),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "conflict");
}

#[tokio::test]
async fn numeric_password_is_rejected() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/register/",
            None,
            Some(json!({"username": "digits", "password": "12345678"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}
