//! Integration tests for moderator invitations.
//!
//! Run with: cargo test --test invitations_integration

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_player, create_test_app, free_match, get_request_with_auth, json_request_with_auth,
    open_match, parse_response_body, post_request_with_auth, register_for_match,
    set_match_status, test_config, AuthenticatedUser,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn invite(
    app: &axum::Router,
    sender: &AuthenticatedUser,
    recipient_name: &str,
    match_id: Option<&str>,
) -> (StatusCode, Value) {
    let mut body = json!({ "recipient_name": recipient_name });
    if let Some(match_id) = match_id {
        body["match_id"] = json!(match_id);
    }
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/invitations",
            body,
            &sender.access_token,
        ))
        .await
        .unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

async fn resolve(
    app: &axum::Router,
    actor: &AuthenticatedUser,
    invitation_id: &str,
    action: &str,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(post_request_with_auth(
            &format!("/api/v1/invitations/{}/{}", invitation_id, action),
            &actor.access_token,
        ))
        .await
        .unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

// ============================================================================
// Invite Tests
// ============================================================================

#[tokio::test]
async fn test_invite_by_display_name() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let guest = create_player(&app).await;
    let match_id = open_match(&app, &moderator, free_match(1)).await;

    // Names resolve regardless of case.
    let (status, invitation) =
        invite(&app, &moderator, &guest.display_name.to_lowercase(), Some(&match_id)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invitation["sender_id"], moderator.player_id);
    assert_eq!(invitation["recipient_id"], guest.player_id);
    assert_eq!(invitation["match_id"], match_id);
    assert_eq!(invitation["status"], "pending");

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/invitations", &guest.access_token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["received"].as_array().unwrap().len(), 1);
    assert!(body["sent"].as_array().unwrap().is_empty());

    let response = app
        .oneshot(get_request_with_auth("/api/v1/invitations", &moderator.access_token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["sent"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invite_defaults_to_latest_open_match() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let guest = create_player(&app).await;
    let match_id = open_match(&app, &moderator, free_match(1)).await;

    let (status, invitation) = invite(&app, &moderator, &guest.display_name, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(invitation["match_id"], match_id);
}

#[tokio::test]
async fn test_invite_without_open_match() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let guest = create_player(&app).await;

    let (status, _) = invite(&app, &moderator, &guest.display_name, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invite_failures() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let other = create_player(&app).await;
    let guest = create_player(&app).await;
    let match_id = open_match(&app, &moderator, free_match(1)).await;

    let (status, _) = invite(&app, &moderator, "Nobody Here", Some(&match_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = invite(&app, &moderator, &moderator.display_name, Some(&match_id)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = invite(&app, &other, &guest.display_name, Some(&match_id)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = invite(&app, &moderator, &guest.display_name, Some(&match_id)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = invite(&app, &moderator, &guest.display_name, Some(&match_id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

// ============================================================================
// Resolution Tests
// ============================================================================

#[tokio::test]
async fn test_accept_invitation_registers_player() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let guest = create_player(&app).await;
    let match_id = open_match(&app, &moderator, free_match(1)).await;

    let (_, invitation) = invite(&app, &moderator, &guest.display_name, Some(&match_id)).await;
    let invitation_id = invitation["id"].as_str().unwrap();

    let (status, acceptance) = resolve(&app, &guest, invitation_id, "accept").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(acceptance["invitation"]["status"], "accepted");
    assert_eq!(acceptance["registration"]["match_id"], match_id);
    assert_eq!(acceptance["registration"]["player_id"], guest.player_id);
    assert_eq!(acceptance["registration"]["status"], "accepted");
    assert!(acceptance.get("registration_created").is_none());

    let (status, _) = resolve(&app, &guest, invitation_id, "accept").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    // A new invitation may be sent once the first is resolved.
    let (status, _) = invite(&app, &moderator, &guest.display_name, Some(&match_id)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_accept_promotes_existing_registration() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let guest = create_player(&app).await;
    let match_id = open_match(&app, &moderator, free_match(1)).await;
    let registration = register_for_match(&app, &guest, &match_id).await;

    let (_, invitation) = invite(&app, &moderator, &guest.display_name, Some(&match_id)).await;
    let (status, acceptance) =
        resolve(&app, &guest, invitation["id"].as_str().unwrap(), "accept").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(acceptance["registration"]["id"], registration["id"]);
    assert_eq!(acceptance["registration"]["status"], "accepted");
    assert_eq!(
        acceptance["registration"]["access_token"],
        registration["access_token"]
    );
}

#[tokio::test]
async fn test_accept_after_decline_conflicts() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let guest = create_player(&app).await;
    let match_id = open_match(&app, &moderator, free_match(1)).await;
    let registration = register_for_match(&app, &guest, &match_id).await;

    let response = app
        .clone()
        .oneshot(post_request_with_auth(
            &format!(
                "/api/v1/registrations/{}/decline",
                registration["id"].as_str().unwrap()
            ),
            &moderator.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, invitation) = invite(&app, &moderator, &guest.display_name, Some(&match_id)).await;
    let invitation_id = invitation["id"].as_str().unwrap();
    let (status, _) = resolve(&app, &guest, invitation_id, "accept").await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The failed accept leaves the invitation open.
    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/invitations", &guest.access_token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["received"][0]["status"], "pending");

    let (status, rejected) = resolve(&app, &guest, invitation_id, "reject").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");
}

#[tokio::test]
async fn test_accept_for_closed_match_not_allowed() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let guest = create_player(&app).await;
    let match_id = open_match(&app, &moderator, free_match(1)).await;
    let (_, invitation) = invite(&app, &moderator, &guest.display_name, Some(&match_id)).await;
    let invitation_id = invitation["id"].as_str().unwrap();

    set_match_status(&app, &moderator, &match_id, "closed").await;

    let (status, _) = resolve(&app, &guest, invitation_id, "accept").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    // The invitation is still pending and can be rejected.
    let (status, rejected) = resolve(&app, &guest, invitation_id, "reject").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");
}

#[tokio::test]
async fn test_only_recipient_resolves() {
    let app = create_test_app(test_config());
    let moderator = create_player(&app).await;
    let guest = create_player(&app).await;
    let match_id = open_match(&app, &moderator, free_match(1)).await;
    let (_, invitation) = invite(&app, &moderator, &guest.display_name, Some(&match_id)).await;
    let invitation_id = invitation["id"].as_str().unwrap();

    for action in ["accept", "reject"] {
        let (status, _) = resolve(&app, &moderator, invitation_id, action).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    let (status, _) = resolve(&app, &guest, &uuid::Uuid::new_v4().to_string(), "accept").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
