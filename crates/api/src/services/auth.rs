//! Sign-up and login.

use domain::models::{AuthResponse, LoginRequest, NewPlayer, Player, SignUpRequest};
use domain::services::PlayerService;
use domain::DomainError;
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::Domain(e) => e.into(),
            AuthError::TokenError(e) => ApiError::Internal(e.to_string()),
            AuthError::PasswordError(e) => ApiError::Internal(e.to_string()),
        }
    }
}

pub struct AuthService {
    players: Arc<PlayerService>,
    jwt: Arc<JwtConfig>,
}

impl AuthService {
    pub fn new(players: Arc<PlayerService>, jwt: Arc<JwtConfig>) -> Self {
        Self { players, jwt }
    }

    /// Creates the account and returns a session for it.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<AuthResponse, AuthError> {
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))??;

        let player = self
            .players
            .register(NewPlayer {
                display_name: request.display_name,
                email: request.email,
                password_hash,
            })
            .await?;

        self.session_for(player)
    }

    /// Unknown email and wrong password fail the same way.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let player = self
            .players
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = request.password;
        let hash = player.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| PasswordError::VerifyError(e.to_string()))??;
        if !valid {
            info!(player_id = %player.id, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        self.session_for(player)
    }

    fn session_for(&self, player: Player) -> Result<AuthResponse, AuthError> {
        let (access_token, jti) = self.jwt.issue(player.id)?;
        info!(player_id = %player.id, jti = %jti, "Session issued");

        Ok(AuthResponse {
            player,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.access_token_expiry_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::store::Stores;

    fn service() -> AuthService {
        let stores = Stores::in_memory();
        let jwt = JwtConfig::from_secret("matchday-test-secret-0123456789", 3600, 0).unwrap();
        AuthService::new(
            Arc::new(PlayerService::new(stores.players)),
            Arc::new(jwt),
        )
    }

    fn sign_up_request() -> SignUpRequest {
        SignUpRequest {
            email: "Ana@Example.com".to_string(),
            password: "correct horse".to_string(),
            display_name: "Ana".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_then_login() {
        let service = service();

        let signed_up = service.sign_up(sign_up_request()).await.unwrap();
        assert_eq!(signed_up.player.email, "ana@example.com");
        assert_eq!(signed_up.token_type, "Bearer");

        let logged_in = service
            .login(LoginRequest {
                email: "ana@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.player.id, signed_up.player.id);

        let claims = service.jwt.validate(&logged_in.access_token).unwrap();
        assert_eq!(claims.sub, signed_up.player.id.to_string());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = service();
        service.sign_up(sign_up_request()).await.unwrap();

        let wrong_password = service
            .login(LoginRequest {
                email: "ana@example.com".to_string(),
                password: "wrong horse".to_string(),
            })
            .await;
        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

        let unknown = service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_duplicate_sign_up() {
        let service = service();
        service.sign_up(sign_up_request()).await.unwrap();

        let again = service.sign_up(sign_up_request()).await;
        assert!(matches!(
            again,
            Err(AuthError::Domain(DomainError::Conflict(_)))
        ));
    }
}
