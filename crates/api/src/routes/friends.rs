//! Friend requests.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{FriendRequest, ListFriendRequestsResponse, SendFriendRequest};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentPlayer;

/// Send a friend request to the player with the given email.
///
/// POST /api/v1/friends
pub async fn send_request(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Json(request): Json<SendFriendRequest>,
) -> Result<(StatusCode, Json<FriendRequest>), ApiError> {
    request.validate()?;

    let relation = state
        .services
        .social
        .request(current.player_id, &request.email)
        .await?;
    Ok((StatusCode::CREATED, Json(relation)))
}

/// Relations the caller takes part in, pending or accepted.
///
/// GET /api/v1/friends
pub async fn list_relations(
    State(state): State<AppState>,
    current: CurrentPlayer,
) -> Result<Json<ListFriendRequestsResponse>, ApiError> {
    let data = state
        .services
        .social
        .list_relations(current.player_id)
        .await?;
    Ok(Json(ListFriendRequestsResponse { data }))
}

/// POST /api/v1/friends/:relation_id/accept
pub async fn accept_request(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(relation_id): Path<Uuid>,
) -> Result<Json<FriendRequest>, ApiError> {
    let relation = state
        .services
        .social
        .accept(relation_id, current.player_id)
        .await?;
    Ok(Json(relation))
}
