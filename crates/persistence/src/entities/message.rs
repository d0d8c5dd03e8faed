//! Message entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Message;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct MessageEntity {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl From<MessageEntity> for Message {
    fn from(entity: MessageEntity) -> Self {
        Self {
            id: entity.id,
            sender_id: entity.sender_id,
            recipient_id: entity.recipient_id,
            body: entity.body,
            sent_at: entity.sent_at,
        }
    }
}
