//! Registration routes: joining a match, moderator review, rosters and
//! certificates.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use domain::models::{
    Certificate, EligibilityResponse, ListRegistrationsResponse, Registration, RosterResponse,
};
use tracing::warn;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentPlayer;
use crate::middleware::metrics::record_registration_created;
use crate::services::roster_export::{roster_csv, roster_filename};

/// Register the caller for a match.
///
/// POST /api/v1/matches/:match_id/registrations
pub async fn register(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(match_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let registration = state
        .services
        .registrations
        .register(match_id, current.player_id)
        .await?;
    record_registration_created();
    Ok((StatusCode::CREATED, Json(registration)))
}

/// Registered players with name and email. Moderator only.
///
/// GET /api/v1/matches/:match_id/registrations
pub async fn roster(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(match_id): Path<Uuid>,
) -> Result<Json<RosterResponse>, ApiError> {
    state
        .services
        .matches
        .ensure_moderator(match_id, current.player_id)
        .await?;
    let data = state.services.registrations.roster(match_id).await?;
    Ok(Json(RosterResponse { match_id, data }))
}

/// Roster as CSV (`ID,Name,Email`). Moderator only.
///
/// GET /api/v1/matches/:match_id/registrations/export
pub async fn export_roster(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(match_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .matches
        .ensure_moderator(match_id, current.player_id)
        .await?;
    let entries = state.services.registrations.roster(match_id).await?;

    let max = state.config.limits.max_roster_export;
    if entries.len() > max {
        warn!(match_id = %match_id, rows = entries.len(), max, "Roster too large to export");
        return Err(ApiError::Validation(format!(
            "Roster has more than {} registrations and cannot be exported",
            max
        )));
    }

    let disposition = format!("attachment; filename=\"{}\"", roster_filename(match_id));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        roster_csv(&entries),
    ))
}

/// The caller's own registrations.
///
/// GET /api/v1/registrations/me
pub async fn list_mine(
    State(state): State<AppState>,
    current: CurrentPlayer,
) -> Result<Json<ListRegistrationsResponse>, ApiError> {
    let data = state
        .services
        .registrations
        .list_for_player(current.player_id)
        .await?;
    Ok(Json(ListRegistrationsResponse { data }))
}

/// Visible to the registered player and the match moderator.
///
/// GET /api/v1/registrations/:registration_id
pub async fn get_registration(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state
        .services
        .registrations
        .get_visible(registration_id, current.player_id)
        .await?;
    Ok(Json(registration))
}

/// POST /api/v1/registrations/:registration_id/accept
pub async fn accept(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registrations = &state.services.registrations;
    registrations
        .get_moderated(registration_id, current.player_id)
        .await?;
    Ok(Json(registrations.accept(registration_id).await?))
}

/// POST /api/v1/registrations/:registration_id/decline
pub async fn decline(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registrations = &state.services.registrations;
    registrations
        .get_moderated(registration_id, current.player_id)
        .await?;
    Ok(Json(registrations.decline(registration_id).await?))
}

/// Moderator attests that the player paid. Idempotent.
///
/// POST /api/v1/registrations/:registration_id/confirm-payment
pub async fn confirm_payment(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registrations = &state.services.registrations;
    registrations
        .get_moderated(registration_id, current.player_id)
        .await?;
    Ok(Json(registrations.confirm_payment(registration_id).await?))
}

/// GET /api/v1/registrations/:registration_id/eligibility
pub async fn eligibility(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<EligibilityResponse>, ApiError> {
    state
        .services
        .registrations
        .get_visible(registration_id, current.player_id)
        .await?;
    let eligible = state
        .services
        .certificates
        .is_eligible(registration_id)
        .await?;
    Ok(Json(EligibilityResponse {
        registration_id,
        eligible,
    }))
}

/// Certificate data for the document renderer.
///
/// GET /api/v1/registrations/:registration_id/certificate
pub async fn certificate(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<Certificate>, ApiError> {
    state
        .services
        .registrations
        .get_visible(registration_id, current.player_id)
        .await?;
    let certificate = state
        .services
        .certificates
        .certificate(registration_id)
        .await?;
    Ok(Json(certificate))
}
