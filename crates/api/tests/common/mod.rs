//! Common test utilities for integration tests.
//!
//! Every test builds its own router over the in-memory stores, so tests run
//! in parallel without a database.

// Helpers are shared by several test binaries; not every binary uses all of them.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use domain::store::Stores;
use fake::{faker::name::en::FirstName, Fake};
use matchday_api::{app::create_app, config::Config};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "matchday-test-secret-0123456789";

/// Test configuration with an HS256 secret and rate limiting disabled.
pub fn test_config() -> Config {
    Config {
        server: matchday_api::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Use random port
            request_timeout_secs: 30,
        },
        database: matchday_api::config::DatabaseConfig {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: matchday_api::config::LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: matchday_api::config::SecurityConfig {
            cors_origins: vec![],
            rate_limit_per_minute: 0, // Disable rate limiting for tests
        },
        limits: matchday_api::config::LimitsConfig {
            default_check_in_ceiling: 1,
            max_check_in_ceiling: 100,
            max_roster_export: 5000,
        },
        jwt: matchday_api::config::JwtAuthConfig {
            private_key: String::new(),
            public_key: String::new(),
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_secs: 3600,
            leeway_secs: 30,
        },
    }
}

/// Create a test application router backed by fresh in-memory stores.
pub fn create_test_app(config: Config) -> Router {
    create_app(config, Stores::in_memory(), None).expect("Failed to build test app")
}

/// Generate a unique email for testing.
pub fn unique_test_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

/// Test player data.
pub struct TestUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl TestUser {
    pub fn new() -> Self {
        let first: String = FirstName().fake();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            email: unique_test_email(),
            password: "SecureP@ss123!".to_string(),
            display_name: format!("{} {}", first, &suffix[..8]),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new()
    }
}

/// Authenticated player context for tests.
pub struct AuthenticatedUser {
    pub player_id: String,
    pub email: String,
    pub display_name: String,
    pub access_token: String,
}

/// Register a player and return authentication context.
pub async fn create_authenticated_user(app: &Router, user: &TestUser) -> AuthenticatedUser {
    let request = json_request(
        Method::POST,
        "/api/v1/auth/register",
        json!({
            "email": user.email,
            "password": user.password,
            "display_name": user.display_name
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let json = parse_response_body(response).await;

    if !status.is_success() {
        panic!("Registration failed with status: {}, body: {}", status, json);
    }

    AuthenticatedUser {
        player_id: json["player"]["id"]
            .as_str()
            .unwrap_or_else(|| panic!("Missing player.id in response. Full response: {}", json))
            .to_string(),
        email: json["player"]["email"].as_str().unwrap().to_string(),
        display_name: json["player"]["display_name"].as_str().unwrap().to_string(),
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_else(|| panic!("Missing access_token in response. Full response: {}", json))
            .to_string(),
    }
}

/// Register a fresh random player.
pub async fn create_player(app: &Router) -> AuthenticatedUser {
    create_authenticated_user(app, &TestUser::new()).await
}

/// Open a match as `moderator` and return its ID.
pub async fn open_match(app: &Router, moderator: &AuthenticatedUser, body: Value) -> String {
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/matches",
        body,
        &moderator.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let json = parse_response_body(response).await;

    if !status.is_success() {
        panic!("Opening match failed with status: {}, body: {}", status, json);
    }
    json["id"].as_str().unwrap().to_string()
}

/// A free match body with the given check-in ceiling.
pub fn free_match(ceiling: i32) -> Value {
    json!({
        "match_type": "Football",
        "title": "Sunday five-a-side",
        "location": "Riverside pitch 2",
        "scheduled_at": "2026-11-01T10:00:00Z",
        "check_in_ceiling": ceiling
    })
}

/// A priced match body.
pub fn priced_match(price_cents: i64) -> Value {
    json!({
        "match_type": "Basketball",
        "title": "Evening pickup",
        "scheduled_at": "2026-11-02T19:30:00Z",
        "price_cents": price_cents,
        "payout_key": "payouts@example.com"
    })
}

/// Register `player` for a match and return the registration JSON.
pub async fn register_for_match(
    app: &Router,
    player: &AuthenticatedUser,
    match_id: &str,
) -> Value {
    let response = app
        .clone()
        .oneshot(post_request_with_auth(
            &format!("/api/v1/matches/{}/registrations", match_id),
            &player.access_token,
        ))
        .await
        .unwrap();
    let status = response.status();
    let json = parse_response_body(response).await;

    if !status.is_success() {
        panic!("Registration for match failed with status: {}, body: {}", status, json);
    }
    json
}

/// Move a match to `status` as its moderator.
pub async fn set_match_status(
    app: &Router,
    moderator: &AuthenticatedUser,
    match_id: &str,
    status: &str,
) {
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/v1/matches/{}/status", match_id),
            json!({ "status": status }),
            &moderator.access_token,
        ))
        .await
        .unwrap();
    assert!(
        response.status().is_success(),
        "Setting match status failed with {}",
        response.status()
    );
}

/// Build an unauthenticated JSON request.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a JSON request with authentication.
pub fn json_request_with_auth(
    method: Method,
    uri: &str,
    body: Value,
    token: &str,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a bodiless POST request with authentication.
pub fn post_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Build a GET request with authentication.
pub fn get_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Build an unauthenticated GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Helper to read a response body as text.
pub async fn response_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&body).into_owned()
}
