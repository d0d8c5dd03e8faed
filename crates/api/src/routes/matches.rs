//! Match routes: opening, listing, editing and status changes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    ListMatchesResponse, Match, OpenMatchRequest, SetMatchStatusRequest, UpdateMatchRequest,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::config::LimitsConfig;
use crate::error::ApiError;
use crate::extractors::CurrentPlayer;

/// Query parameters for listing matches.
#[derive(Debug, Default, Deserialize)]
pub struct ListMatchesQuery {
    /// When true, list the caller's own matches in every status instead of
    /// all open matches.
    #[serde(default)]
    pub mine: bool,
}

fn check_ceiling(ceiling: Option<i32>, limits: &LimitsConfig) -> Result<(), ApiError> {
    match ceiling {
        Some(c) if c > limits.max_check_in_ceiling => Err(ApiError::Validation(format!(
            "Check-in ceiling cannot exceed {}",
            limits.max_check_in_ceiling
        ))),
        _ => Ok(()),
    }
}

/// Open a match moderated by the caller.
///
/// POST /api/v1/matches
pub async fn open_match(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Json(mut request): Json<OpenMatchRequest>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    request.validate()?;
    let limits = &state.config.limits;
    check_ceiling(request.check_in_ceiling, limits)?;
    request.check_in_ceiling = request
        .check_in_ceiling
        .or(Some(limits.default_check_in_ceiling));

    let sports_match = state
        .services
        .matches
        .open(request.into_new_match(current.player_id))
        .await?;
    Ok((StatusCode::CREATED, Json(sports_match)))
}

/// GET /api/v1/matches
pub async fn list_matches(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Query(query): Query<ListMatchesQuery>,
) -> Result<Json<ListMatchesResponse>, ApiError> {
    let data = if query.mine {
        state
            .services
            .matches
            .list_moderated_by(current.player_id)
            .await?
    } else {
        state.services.matches.list_open().await?
    };
    Ok(Json(ListMatchesResponse { data }))
}

/// GET /api/v1/matches/:match_id
pub async fn get_match(
    State(state): State<AppState>,
    _current: CurrentPlayer,
    Path(match_id): Path<Uuid>,
) -> Result<Json<Match>, ApiError> {
    Ok(Json(state.services.matches.get(match_id).await?))
}

/// Edit descriptive fields. Moderator only.
///
/// PATCH /api/v1/matches/:match_id
pub async fn update_match(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(match_id): Path<Uuid>,
    Json(request): Json<UpdateMatchRequest>,
) -> Result<Json<Match>, ApiError> {
    request.validate()?;
    check_ceiling(request.check_in_ceiling, &state.config.limits)?;

    let matches = &state.services.matches;
    matches.ensure_moderator(match_id, current.player_id).await?;
    let sports_match = matches.update_details(match_id, request.into()).await?;
    Ok(Json(sports_match))
}

/// Move a match between Open, Closed and Finished. Moderator only.
///
/// PUT /api/v1/matches/:match_id/status
pub async fn set_match_status(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(match_id): Path<Uuid>,
    Json(request): Json<SetMatchStatusRequest>,
) -> Result<Json<Match>, ApiError> {
    let matches = &state.services.matches;
    matches.ensure_moderator(match_id, current.player_id).await?;
    let sports_match = matches.set_status(match_id, request.status).await?;
    Ok(Json(sports_match))
}
