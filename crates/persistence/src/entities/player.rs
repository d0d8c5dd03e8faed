//! Player entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Player;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the players table.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerEntity {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_moderator: bool,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlayerEntity> for Player {
    fn from(entity: PlayerEntity) -> Self {
        Self {
            id: entity.id,
            display_name: entity.display_name,
            email: entity.email,
            password_hash: entity.password_hash,
            is_moderator: entity.is_moderator,
            is_visible: entity.is_visible,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
