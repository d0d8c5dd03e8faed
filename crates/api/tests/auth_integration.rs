//! Integration tests for sign-up, login and player profiles.
//!
//! Run with: cargo test --test auth_integration

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_authenticated_user, create_test_app, get_request, get_request_with_auth, json_request,
    json_request_with_auth, parse_response_body, test_config, TestUser,
};
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// Sign-up Tests
// ============================================================================

#[tokio::test]
async fn test_register_success() {
    let app = create_test_app(test_config());

    let user = TestUser::new();
    let request = json_request(
        Method::POST,
        "/api/v1/auth/register",
        json!({
            "email": user.email.to_uppercase(),
            "password": user.password,
            "display_name": user.display_name
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert!(body["player"]["id"].is_string());
    assert_eq!(body["player"]["email"], user.email.to_lowercase());
    assert_eq!(body["player"]["display_name"], user.display_name);
    assert_eq!(body["player"]["is_moderator"], false);
    assert_eq!(body["player"]["is_visible"], true);
    assert!(body["player"].get("password_hash").is_none());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = create_test_app(test_config());
    let user = TestUser::new();
    create_authenticated_user(&app, &user).await;

    let request = json_request(
        Method::POST,
        "/api/v1/auth/register",
        json!({
            "email": user.email,
            "password": user.password,
            "display_name": "Another Player"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "conflict");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_duplicate_display_name_ignores_case() {
    let app = create_test_app(test_config());
    create_authenticated_user(&app, &TestUser::new().with_name("Ada Lovelace")).await;

    let clash = TestUser::new().with_name("ada lovelace");
    let request = json_request(
        Method::POST,
        "/api/v1/auth/register",
        json!({
            "email": clash.email,
            "password": clash.password,
            "display_name": clash.display_name
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = create_test_app(test_config());

    let cases = [
        json!({ "email": "not-an-email", "password": "SecureP@ss123!", "display_name": "Valid Name" }),
        json!({ "email": "short@example.com", "password": "short", "display_name": "Valid Name" }),
        json!({ "email": "blank@example.com", "password": "SecureP@ss123!", "display_name": "   " }),
    ];

    for body in cases {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/v1/auth/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let app = create_test_app(test_config());
    let user = TestUser::new();
    let registered = create_authenticated_user(&app, &user).await;

    let request = json_request(
        Method::POST,
        "/api/v1/auth/login",
        json!({ "email": user.email, "password": user.password }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["player"]["id"], registered.player_id);
    assert!(body["access_token"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_the_same() {
    let app = create_test_app(test_config());
    let user = TestUser::new();
    create_authenticated_user(&app, &user).await;

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/auth/login",
            json!({ "email": user.email, "password": "WrongP@ss999!" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = parse_response_body(wrong_password).await;

    let unknown = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/auth/login",
            json!({ "email": "nobody@example.com", "password": "WrongP@ss999!" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = parse_response_body(unknown).await;

    assert_eq!(wrong_password["message"], unknown["message"]);
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = create_test_app(test_config());

    let response = app.oneshot(get_request("/api/v1/players/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_protected_route_rejects_garbage_token() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(get_request_with_auth("/api/v1/players/me", "not.a.jwt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let app = create_test_app(test_config());

    let mut other = test_config();
    other.jwt.secret = "a-completely-different-secret-987654".to_string();
    let other_app = create_test_app(other);
    let foreign = create_authenticated_user(&other_app, &TestUser::new()).await;

    let response = app
        .oneshot(get_request_with_auth("/api/v1/players/me", &foreign.access_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_get_me() {
    let app = create_test_app(test_config());
    let player = create_authenticated_user(&app, &TestUser::new()).await;

    let response = app
        .oneshot(get_request_with_auth("/api/v1/players/me", &player.access_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["id"], player.player_id);
    assert_eq!(body["email"], player.email);
}

#[tokio::test]
async fn test_update_me_changes_name_and_visibility() {
    let app = create_test_app(test_config());
    let player = create_authenticated_user(&app, &TestUser::new()).await;

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PATCH,
            "/api/v1/players/me",
            json!({ "display_name": "Grace   Hopper", "is_visible": false }),
            &player.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["display_name"], "Grace Hopper");
    assert_eq!(body["is_visible"], false);
}

#[tokio::test]
async fn test_update_me_rejects_taken_name() {
    let app = create_test_app(test_config());
    let taken = create_authenticated_user(&app, &TestUser::new()).await;
    let player = create_authenticated_user(&app, &TestUser::new()).await;

    let response = app
        .oneshot(json_request_with_auth(
            Method::PATCH,
            "/api/v1/players/me",
            json!({ "display_name": taken.display_name.to_uppercase() }),
            &player.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
