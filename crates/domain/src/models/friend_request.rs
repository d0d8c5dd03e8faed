//! Friend relation domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestStatus::Pending => "pending",
            FriendRequestStatus::Accepted => "accepted",
        }
    }
}

impl fmt::Display for FriendRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A social relation between two players. At most one exists per pair,
/// regardless of direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FriendRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub recipient_id: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FriendRequest {
    /// True if the relation links `a` and `b` in either direction.
    pub fn links(&self, a: Uuid, b: Uuid) -> bool {
        (self.requester_id == a && self.recipient_id == b)
            || (self.requester_id == b && self.recipient_id == a)
    }

    pub fn involves(&self, player_id: Uuid) -> bool {
        self.requester_id == player_id || self.recipient_id == player_id
    }

    pub fn is_accepted(&self) -> bool {
        self.status == FriendRequestStatus::Accepted
    }
}

#[derive(Debug, Clone)]
pub struct NewFriendRequest {
    pub requester_id: Uuid,
    pub recipient_id: Uuid,
}

/// Request payload for sending a friend request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendFriendRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListFriendRequestsResponse {
    pub data: Vec<FriendRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_either_direction() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let relation = FriendRequest {
            id: Uuid::new_v4(),
            requester_id: a,
            recipient_id: b,
            status: FriendRequestStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(relation.links(a, b));
        assert!(relation.links(b, a));
        assert!(!relation.links(a, c));
        assert!(relation.involves(b));
        assert!(!relation.involves(c));
        assert!(!relation.is_accepted());
    }
}
