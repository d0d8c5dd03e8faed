//! Moderator invitations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreateInvitationRequest, Invitation, InvitationAcceptance, ListInvitationsResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentPlayer;
use crate::middleware::metrics::record_registration_created;

/// Invite a player by display name to one of the caller's open matches.
///
/// POST /api/v1/invitations
pub async fn invite(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Json(request): Json<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<Invitation>), ApiError> {
    request.validate()?;

    let invitation = state
        .services
        .invitations
        .invite(current.player_id, &request.recipient_name, request.match_id)
        .await?;
    Ok((StatusCode::CREATED, Json(invitation)))
}

/// GET /api/v1/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    current: CurrentPlayer,
) -> Result<Json<ListInvitationsResponse>, ApiError> {
    let invitations = &state.services.invitations;
    Ok(Json(ListInvitationsResponse {
        received: invitations.list_received(current.player_id).await?,
        sent: invitations.list_sent(current.player_id).await?,
    }))
}

/// Accept and join the match.
///
/// POST /api/v1/invitations/:invitation_id/accept
pub async fn accept(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(invitation_id): Path<Uuid>,
) -> Result<Json<InvitationAcceptance>, ApiError> {
    let acceptance = state
        .services
        .invitations
        .accept(invitation_id, current.player_id)
        .await?;
    if acceptance.registration_created {
        record_registration_created();
    }
    Ok(Json(acceptance))
}

/// POST /api/v1/invitations/:invitation_id/reject
pub async fn reject(
    State(state): State<AppState>,
    current: CurrentPlayer,
    Path(invitation_id): Path<Uuid>,
) -> Result<Json<Invitation>, ApiError> {
    let invitation = state
        .services
        .invitations
        .reject(invitation_id, current.player_id)
        .await?;
    Ok(Json(invitation))
}
