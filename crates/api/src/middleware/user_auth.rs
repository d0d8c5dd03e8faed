//! Bearer token authentication for player routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::jwt::{extract_player_id, JwtConfig};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated player, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct PlayerAuth {
    pub player_id: Uuid,
    /// JWT ID of the session token.
    pub jti: String,
}

impl PlayerAuth {
    /// Validates the `Authorization: Bearer <token>` header.
    pub fn from_headers(jwt: &JwtConfig, headers: &HeaderMap) -> Result<Self, ApiError> {
        let token = bearer_token(headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing or invalid Authorization header".into()))?;

        let claims = jwt.validate(token).map_err(|e| {
            tracing::debug!("JWT validation failed: {}", e);
            ApiError::Unauthorized("Invalid or expired token".into())
        })?;
        let player_id = extract_player_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".into()))?;

        Ok(Self {
            player_id,
            jti: claims.jti,
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid session token.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match PlayerAuth::from_headers(&state.jwt, req.headers()) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn jwt() -> JwtConfig {
        JwtConfig::from_secret("matchday-test-secret-0123456789", 3600, 0).unwrap()
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_bearer_token() {
        let jwt = jwt();
        let player_id = Uuid::new_v4();
        let (token, jti) = jwt.issue(player_id).unwrap();

        let auth = PlayerAuth::from_headers(&jwt, &headers_with(&format!("Bearer {}", token)))
            .unwrap();
        assert_eq!(auth.player_id, player_id);
        assert_eq!(auth.jti, jti);
    }

    #[test]
    fn test_missing_or_malformed_header() {
        let jwt = jwt();
        assert!(matches!(
            PlayerAuth::from_headers(&jwt, &HeaderMap::new()),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            PlayerAuth::from_headers(&jwt, &headers_with("Basic abc")),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            PlayerAuth::from_headers(&jwt, &headers_with("Bearer ")),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_invalid_token() {
        assert!(matches!(
            PlayerAuth::from_headers(&jwt(), &headers_with("Bearer not.a.jwt")),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
