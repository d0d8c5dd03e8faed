//! Player domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Player {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_moderator: bool,
    /// Private profiles (`false`) are invisible to friend-request lookups.
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to persist a new player.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Profile fields a player may edit.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub is_visible: Option<bool>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.is_visible.is_none()
    }
}

/// Public view of a player, safe to show to other players.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlayerSummary {
    pub id: Uuid,
    pub display_name: String,
    pub is_moderator: bool,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            display_name: player.display_name.clone(),
            is_moderator: player.is_moderator,
        }
    }
}

/// Request payload for signing up.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SignUpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,

    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub display_name: String,
}

/// Request payload for logging in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request payload for editing one's own profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub display_name: Option<String>,

    pub is_visible: Option<bool>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            display_name: request.display_name,
            is_visible: request.is_visible,
        }
    }
}

/// Response after sign-up or login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthResponse {
    pub player: Player,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
