//! Door scans.

use axum::{extract::State, Json};
use domain::models::{CheckInReceipt, CheckInRequest};
use domain::DomainError;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentPlayer;
use crate::middleware::metrics::record_check_in;

/// Validate and consume an access token. The caller must moderate the match
/// the token belongs to.
///
/// POST /api/v1/check-ins
pub async fn check_in(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<CheckInReceipt>, ApiError> {
    request.validate()?;

    let result = state
        .services
        .gate
        .check_in_by(current.player_id, request.token.trim())
        .await;

    record_check_in(match &result {
        Ok(_) => "admitted",
        Err(DomainError::NotFound(_)) => "unknown_token",
        Err(DomainError::CheckInLimitReached { .. }) => "limit_reached",
        Err(_) => "denied",
    });

    Ok(Json(result?))
}
