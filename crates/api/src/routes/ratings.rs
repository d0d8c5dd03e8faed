//! Post-match ratings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{RateMatchRequest, Rating, RatingSummary};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentPlayer;

/// Rate a finished match the caller attended.
///
/// POST /api/v1/matches/:match_id/ratings
pub async fn rate_match(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(match_id): Path<Uuid>,
    Json(request): Json<RateMatchRequest>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    request.validate()?;

    let rating = state
        .services
        .ratings
        .rate(match_id, current.player_id, request.score, request.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// GET /api/v1/matches/:match_id/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    _current: CurrentPlayer,
    Path(match_id): Path<Uuid>,
) -> Result<Json<RatingSummary>, ApiError> {
    Ok(Json(state.services.ratings.list(match_id).await?))
}
