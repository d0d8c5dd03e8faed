//! Rating repository for database operations.

use async_trait::async_trait;
use domain::models::{NewRating, Rating};
use domain::store::RatingStore;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RatingEntity;
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

/// Repository for rating database operations.
#[derive(Clone)]
pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStore for RatingRepository {
    async fn insert(&self, rating: NewRating) -> DomainResult<Rating> {
        let timer = QueryTimer::new("insert_rating");
        let result = sqlx::query_as::<_, RatingEntity>(
            r#"
            INSERT INTO ratings (match_id, player_id, score, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, match_id, player_id, score, comment, created_at
            "#,
        )
        .bind(rating.match_id)
        .bind(rating.player_id)
        .bind(rating.score)
        .bind(&rating.comment)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map(Into::into).map_err(map_sqlx_error)
    }

    async fn list_by_match(&self, match_id: Uuid) -> DomainResult<Vec<Rating>> {
        let timer = QueryTimer::new("list_ratings_by_match");
        let result = sqlx::query_as::<_, RatingEntity>(
            r#"
            SELECT id, match_id, player_id, score, comment, created_at
            FROM ratings
            WHERE match_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(map_sqlx_error)
    }
}
