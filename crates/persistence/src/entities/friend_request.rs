//! Friend request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{FriendRequest, FriendRequestStatus};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "friend_request_status", rename_all = "lowercase")]
pub enum FriendRequestStatusDb {
    Pending,
    Accepted,
}

impl From<FriendRequestStatusDb> for FriendRequestStatus {
    fn from(status: FriendRequestStatusDb) -> Self {
        match status {
            FriendRequestStatusDb::Pending => FriendRequestStatus::Pending,
            FriendRequestStatusDb::Accepted => FriendRequestStatus::Accepted,
        }
    }
}

/// Database row mapping for the friend_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct FriendRequestEntity {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub recipient_id: Uuid,
    pub status: FriendRequestStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FriendRequestEntity> for FriendRequest {
    fn from(entity: FriendRequestEntity) -> Self {
        Self {
            id: entity.id,
            requester_id: entity.requester_id,
            recipient_id: entity.recipient_id,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
