//! Match entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Match, MatchStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for match_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
pub enum MatchStatusDb {
    Open,
    Closed,
    Finished,
}

impl From<MatchStatusDb> for MatchStatus {
    fn from(status: MatchStatusDb) -> Self {
        match status {
            MatchStatusDb::Open => MatchStatus::Open,
            MatchStatusDb::Closed => MatchStatus::Closed,
            MatchStatusDb::Finished => MatchStatus::Finished,
        }
    }
}

impl From<MatchStatus> for MatchStatusDb {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Open => MatchStatusDb::Open,
            MatchStatus::Closed => MatchStatusDb::Closed,
            MatchStatus::Finished => MatchStatusDb::Finished,
        }
    }
}

/// Database row mapping for the matches table.
#[derive(Debug, Clone, FromRow)]
pub struct MatchEntity {
    pub id: Uuid,
    pub moderator_id: Uuid,
    pub match_type: String,
    pub title: String,
    pub location: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub status: MatchStatusDb,
    pub price_cents: i64,
    pub payout_key: Option<String>,
    pub check_in_ceiling: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MatchEntity> for Match {
    fn from(entity: MatchEntity) -> Self {
        Self {
            id: entity.id,
            moderator_id: entity.moderator_id,
            match_type: entity.match_type,
            title: entity.title,
            location: entity.location,
            scheduled_at: entity.scheduled_at,
            status: entity.status.into(),
            price_cents: entity.price_cents,
            payout_key: entity.payout_key,
            check_in_ceiling: entity.check_in_ceiling,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
