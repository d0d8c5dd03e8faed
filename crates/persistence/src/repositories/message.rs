//! Message repository for database operations.

use async_trait::async_trait;
use domain::models::{Message, NewMessage};
use domain::store::MessageStore;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::MessageEntity;
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn insert(&self, message: NewMessage) -> DomainResult<Message> {
        let timer = QueryTimer::new("insert_message");
        let result = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (sender_id, recipient_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, sender_id, recipient_id, body, sent_at
            "#,
        )
        .bind(message.sender_id)
        .bind(message.recipient_id)
        .bind(&message.body)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map(Into::into).map_err(map_sqlx_error)
    }

    async fn conversation(&self, a: Uuid, b: Uuid) -> DomainResult<Vec<Message>> {
        let timer = QueryTimer::new("list_conversation");
        let result = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT id, sender_id, recipient_id, body, sent_at
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY sent_at ASC
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_all(&self.pool)
        .await;
        timer.finish(&result);
        result
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(map_sqlx_error)
    }
}
