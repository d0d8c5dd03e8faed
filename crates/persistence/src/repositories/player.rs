//! Player repository for database operations.

use async_trait::async_trait;
use domain::models::{NewPlayer, Player, ProfileChanges};
use domain::store::PlayerStore;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PlayerEntity;
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

const PLAYER_COLUMNS: &str =
    "id, display_name, email, password_hash, is_moderator, is_visible, created_at, updated_at";

/// Repository for player-related database operations.
#[derive(Clone)]
pub struct PlayerRepository {
    pool: PgPool,
}

impl PlayerRepository {
    /// Creates a new PlayerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for PlayerRepository {
    async fn insert(&self, player: NewPlayer) -> DomainResult<Player> {
        let timer = QueryTimer::new("insert_player");
        let result = sqlx::query_as::<_, PlayerEntity>(&format!(
            r#"
            INSERT INTO players (display_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(&player.display_name)
        .bind(&player.email)
        .bind(&player.password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map(Into::into).map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Player>> {
        let timer = QueryTimer::new("find_player_by_id");
        let result = sqlx::query_as::<_, PlayerEntity>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|p| p.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Player>> {
        let timer = QueryTimer::new("find_player_by_email");
        let result = sqlx::query_as::<_, PlayerEntity>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|p| p.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn find_by_display_name(&self, name: &str) -> DomainResult<Option<Player>> {
        let timer = QueryTimer::new("find_player_by_display_name");
        let result = sqlx::query_as::<_, PlayerEntity>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE LOWER(display_name) = LOWER($1)"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|p| p.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> DomainResult<Option<Player>> {
        let timer = QueryTimer::new("update_player_profile");
        let result = sqlx::query_as::<_, PlayerEntity>(&format!(
            r#"
            UPDATE players
            SET display_name = COALESCE($2, display_name),
                is_visible = COALESCE($3, is_visible),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.display_name)
        .bind(changes.is_visible)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|p| p.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn set_moderator(&self, id: Uuid, is_moderator: bool) -> DomainResult<Option<Player>> {
        let timer = QueryTimer::new("set_player_moderator");
        let result = sqlx::query_as::<_, PlayerEntity>(&format!(
            r#"
            UPDATE players
            SET is_moderator = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(is_moderator)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|p| p.map(Into::into)).map_err(map_sqlx_error)
    }
}
