//! Invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Invitation, InvitationStatus};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
pub enum InvitationStatusDb {
    Pending,
    Accepted,
    Rejected,
}

impl From<InvitationStatusDb> for InvitationStatus {
    fn from(status: InvitationStatusDb) -> Self {
        match status {
            InvitationStatusDb::Pending => InvitationStatus::Pending,
            InvitationStatusDb::Accepted => InvitationStatus::Accepted,
            InvitationStatusDb::Rejected => InvitationStatus::Rejected,
        }
    }
}

impl From<InvitationStatus> for InvitationStatusDb {
    fn from(status: InvitationStatus) -> Self {
        match status {
            InvitationStatus::Pending => InvitationStatusDb::Pending,
            InvitationStatus::Accepted => InvitationStatusDb::Accepted,
            InvitationStatus::Rejected => InvitationStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub match_id: Uuid,
    pub status: InvitationStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvitationEntity> for Invitation {
    fn from(entity: InvitationEntity) -> Self {
        Self {
            id: entity.id,
            sender_id: entity.sender_id,
            recipient_id: entity.recipient_id,
            match_id: entity.match_id,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
