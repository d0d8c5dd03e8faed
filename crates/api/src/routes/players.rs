//! The authenticated player's own profile.

use axum::{extract::State, Json};
use domain::models::{Player, UpdateProfileRequest};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentPlayer;

/// GET /api/v1/players/me
pub async fn get_me(
    State(state): State<AppState>,
    current: CurrentPlayer,
) -> Result<Json<Player>, ApiError> {
    let player = state.services.players.get(current.player_id).await?;
    Ok(Json(player))
}

/// Edit display name and visibility.
///
/// PATCH /api/v1/players/me
pub async fn update_me(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Player>, ApiError> {
    request.validate()?;

    let player = state
        .services
        .players
        .update_profile(current.player_id, request.into())
        .await?;
    Ok(Json(player))
}
