//! Match repository for database operations.

use async_trait::async_trait;
use domain::models::{Match, MatchChanges, MatchStatus, NewMatch};
use domain::store::MatchStore;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MatchEntity, MatchStatusDb};
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

const MATCH_COLUMNS: &str = "id, moderator_id, match_type, title, location, scheduled_at, status, \
     price_cents, payout_key, check_in_ceiling, created_at, updated_at";

/// Repository for match-related database operations.
#[derive(Clone)]
pub struct MatchRepository {
    pool: PgPool,
}

impl MatchRepository {
    /// Creates a new MatchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for MatchRepository {
    async fn insert(&self, new_match: NewMatch) -> DomainResult<Match> {
        let timer = QueryTimer::new("insert_match");
        let result = sqlx::query_as::<_, MatchEntity>(&format!(
            r#"
            INSERT INTO matches (moderator_id, match_type, title, location, scheduled_at,
                                 price_cents, payout_key, check_in_ceiling)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(new_match.moderator_id)
        .bind(&new_match.match_type)
        .bind(&new_match.title)
        .bind(&new_match.location)
        .bind(new_match.scheduled_at)
        .bind(new_match.price_cents)
        .bind(&new_match.payout_key)
        .bind(new_match.check_in_ceiling)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map(Into::into).map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Match>> {
        let timer = QueryTimer::new("find_match_by_id");
        let result = sqlx::query_as::<_, MatchEntity>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|m| m.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn set_status(&self, id: Uuid, status: MatchStatus) -> DomainResult<Option<Match>> {
        let timer = QueryTimer::new("set_match_status");
        let result = sqlx::query_as::<_, MatchEntity>(&format!(
            r#"
            UPDATE matches SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(MatchStatusDb::from(status))
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|m| m.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn update_details(
        &self,
        id: Uuid,
        changes: MatchChanges,
    ) -> DomainResult<Option<Match>> {
        let timer = QueryTimer::new("update_match_details");
        let result = sqlx::query_as::<_, MatchEntity>(&format!(
            r#"
            UPDATE matches
            SET match_type = COALESCE($2, match_type),
                title = COALESCE($3, title),
                location = COALESCE($4, location),
                scheduled_at = COALESCE($5, scheduled_at),
                price_cents = COALESCE($6, price_cents),
                payout_key = COALESCE($7, payout_key),
                check_in_ceiling = COALESCE($8, check_in_ceiling),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.match_type)
        .bind(changes.title)
        .bind(changes.location)
        .bind(changes.scheduled_at)
        .bind(changes.price_cents)
        .bind(changes.payout_key)
        .bind(changes.check_in_ceiling)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|m| m.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn find_open_by_moderator(&self, moderator_id: Uuid) -> DomainResult<Option<Match>> {
        let timer = QueryTimer::new("find_open_match_by_moderator");
        let result = sqlx::query_as::<_, MatchEntity>(&format!(
            r#"
            SELECT {MATCH_COLUMNS} FROM matches
            WHERE moderator_id = $1 AND status = 'open'
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(moderator_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|m| m.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn list_by_status(&self, status: MatchStatus) -> DomainResult<Vec<Match>> {
        let timer = QueryTimer::new("list_matches_by_status");
        let result = sqlx::query_as::<_, MatchEntity>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE status = $1 ORDER BY scheduled_at ASC"
        ))
        .bind(MatchStatusDb::from(status))
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(map_sqlx_error)
    }

    async fn list_by_moderator(&self, moderator_id: Uuid) -> DomainResult<Vec<Match>> {
        let timer = QueryTimer::new("list_matches_by_moderator");
        let result = sqlx::query_as::<_, MatchEntity>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE moderator_id = $1 ORDER BY created_at ASC"
        ))
        .bind(moderator_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(map_sqlx_error)
    }
}
