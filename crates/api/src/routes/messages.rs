//! Private messages between accepted friends.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{ConversationResponse, Message, SendMessageRequest};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentPlayer;

/// POST /api/v1/messages
pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    request.validate()?;

    let message = state
        .services
        .social
        .send_message(current.player_id, request.recipient_id, &request.body)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Messages exchanged with another player, oldest first.
///
/// GET /api/v1/messages/:player_id
pub async fn get_conversation(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(player_id): Path<Uuid>,
) -> Result<Json<ConversationResponse>, ApiError> {
    let data = state
        .services
        .social
        .conversation(current.player_id, player_id)
        .await?;
    Ok(Json(ConversationResponse { data }))
}
