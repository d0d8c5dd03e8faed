//! Friend request repository for database operations.

use async_trait::async_trait;
use domain::models::{FriendRequest, NewFriendRequest};
use domain::store::FriendRequestStore;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::FriendRequestEntity;
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

const FRIEND_REQUEST_COLUMNS: &str =
    "id, requester_id, recipient_id, status, created_at, updated_at";

/// Repository for friend request database operations.
#[derive(Clone)]
pub struct FriendRequestRepository {
    pool: PgPool,
}

impl FriendRequestRepository {
    /// Creates a new FriendRequestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendRequestStore for FriendRequestRepository {
    async fn insert(&self, request: NewFriendRequest) -> DomainResult<FriendRequest> {
        let timer = QueryTimer::new("insert_friend_request");
        let result = sqlx::query_as::<_, FriendRequestEntity>(&format!(
            r#"
            INSERT INTO friend_requests (requester_id, recipient_id)
            VALUES ($1, $2)
            RETURNING {FRIEND_REQUEST_COLUMNS}
            "#
        ))
        .bind(request.requester_id)
        .bind(request.recipient_id)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map(Into::into).map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<FriendRequest>> {
        let timer = QueryTimer::new("find_friend_request_by_id");
        let result = sqlx::query_as::<_, FriendRequestEntity>(&format!(
            "SELECT {FRIEND_REQUEST_COLUMNS} FROM friend_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|f| f.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn find_between(&self, a: Uuid, b: Uuid) -> DomainResult<Option<FriendRequest>> {
        let timer = QueryTimer::new("find_friend_request_between");
        let result = sqlx::query_as::<_, FriendRequestEntity>(&format!(
            r#"
            SELECT {FRIEND_REQUEST_COLUMNS} FROM friend_requests
            WHERE (requester_id = $1 AND recipient_id = $2)
               OR (requester_id = $2 AND recipient_id = $1)
            "#
        ))
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|f| f.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn accept(&self, id: Uuid) -> DomainResult<Option<FriendRequest>> {
        let timer = QueryTimer::new("accept_friend_request");
        let result = sqlx::query_as::<_, FriendRequestEntity>(&format!(
            r#"
            UPDATE friend_requests SET status = 'accepted', updated_at = NOW()
            WHERE id = $1
            RETURNING {FRIEND_REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|f| f.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn list_for_player(&self, player_id: Uuid) -> DomainResult<Vec<FriendRequest>> {
        let timer = QueryTimer::new("list_friend_requests_for_player");
        let result = sqlx::query_as::<_, FriendRequestEntity>(&format!(
            r#"
            SELECT {FRIEND_REQUEST_COLUMNS} FROM friend_requests
            WHERE requester_id = $1 OR recipient_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(player_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(map_sqlx_error)
    }
}

#[cfg(test)]
mod tests {
    // Note: FriendRequestRepository tests require database connection and are covered by integration tests
}
