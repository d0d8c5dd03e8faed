//! Invitation repository for database operations.

use async_trait::async_trait;
use domain::models::{Invitation, InvitationStatus, NewInvitation};
use domain::store::InvitationStore;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{InvitationEntity, InvitationStatusDb};
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

const INVITATION_COLUMNS: &str =
    "id, sender_id, recipient_id, match_id, status, created_at, updated_at";

/// Repository for invitation-related database operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new InvitationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(
        &self,
        query_name: &'static str,
        column: &str,
        player_id: Uuid,
    ) -> DomainResult<Vec<Invitation>> {
        let timer = QueryTimer::new(query_name);
        let result = sqlx::query_as::<_, InvitationEntity>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE {column} = $1 ORDER BY created_at ASC"
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

#[async_trait]
impl InvitationStore for InvitationRepository {
    async fn insert(&self, invitation: NewInvitation) -> DomainResult<Invitation> {
        let timer = QueryTimer::new("insert_invitation");
        let result = sqlx::query_as::<_, InvitationEntity>(&format!(
            r#"
            INSERT INTO invitations (sender_id, recipient_id, match_id)
            VALUES ($1, $2, $3)
            RETURNING {INVITATION_COLUMNS}
            "#
        ))
        .bind(invitation.sender_id)
        .bind(invitation.recipient_id)
        .bind(invitation.match_id)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map(Into::into).map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Invitation>> {
        let timer = QueryTimer::new("find_invitation_by_id");
        let result = sqlx::query_as::<_, InvitationEntity>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|i| i.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn pending_exists(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        match_id: Uuid,
    ) -> DomainResult<bool> {
        let timer = QueryTimer::new("pending_invitation_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM invitations
                WHERE sender_id = $1 AND recipient_id = $2 AND match_id = $3
                  AND status = 'pending'
            )
            "#,
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(match_id)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map_err(map_sqlx_error)
    }

    async fn resolve(
        &self,
        id: Uuid,
        status: InvitationStatus,
    ) -> DomainResult<Option<Invitation>> {
        let timer = QueryTimer::new("resolve_invitation");
        let result = sqlx::query_as::<_, InvitationEntity>(&format!(
            r#"
            UPDATE invitations SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {INVITATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(InvitationStatusDb::from(status))
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|i| i.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn list_received(&self, recipient_id: Uuid) -> DomainResult<Vec<Invitation>> {
        self.list_where("list_received_invitations", "recipient_id", recipient_id)
            .await
    }

    async fn list_sent(&self, sender_id: Uuid) -> DomainResult<Vec<Invitation>> {
        self.list_where("list_sent_invitations", "sender_id", sender_id)
            .await
    }
}
