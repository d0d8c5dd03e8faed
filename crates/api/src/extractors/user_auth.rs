//! Authenticated player extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::PlayerAuth;

/// The player making the request.
///
/// Reuses the identity inserted by `require_user_auth` and falls back to
/// validating the bearer token itself.
#[derive(Debug, Clone, Copy)]
pub struct CurrentPlayer {
    pub player_id: Uuid,
}

impl From<&PlayerAuth> for CurrentPlayer {
    fn from(auth: &PlayerAuth) -> Self {
        Self {
            player_id: auth.player_id,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentPlayer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<PlayerAuth>() {
            return Ok(auth.into());
        }

        let auth = PlayerAuth::from_headers(&state.jwt, &parts.headers)?;
        Ok((&auth).into())
    }
}
