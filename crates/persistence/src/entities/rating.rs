//! Rating entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Rating;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct RatingEntity {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub score: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RatingEntity> for Rating {
    fn from(entity: RatingEntity) -> Self {
        Self {
            id: entity.id,
            match_id: entity.match_id,
            player_id: entity.player_id,
            score: entity.score,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }
}
