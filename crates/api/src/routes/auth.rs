//! Sign-up and login.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{AuthResponse, LoginRequest, SignUpRequest};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Create a player account and return a session token.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let response = state.services.auth.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let response = state.services.auth.login(request).await?;
    Ok(Json(response))
}
