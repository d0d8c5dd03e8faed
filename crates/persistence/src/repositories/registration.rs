//! Registration repository for database operations.

use async_trait::async_trait;
use domain::models::{
    CheckInOutcome, NewRegistration, Registration, RegistrationStatus, RosterEntry,
};
use domain::store::RegistrationStore;
use domain::DomainResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    CheckInStateEntity, CheckedInEntity, PaymentStatusDb, RegistrationEntity,
    RegistrationStatusDb, RosterEntryEntity,
};
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

const REGISTRATION_COLUMNS: &str = "id, match_id, player_id, status, payment_status, \
     access_token, check_in_count, created_at, updated_at";

/// Repository for registration-related database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn insert(&self, registration: NewRegistration) -> DomainResult<Registration> {
        let timer = QueryTimer::new("insert_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            INSERT INTO registrations (match_id, player_id, payment_status, access_token)
            VALUES ($1, $2, $3, $4)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration.match_id)
        .bind(registration.player_id)
        .bind(PaymentStatusDb::from(registration.payment_status))
        .bind(&registration.access_token)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map(Into::into).map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Registration>> {
        let timer = QueryTimer::new("find_registration_by_id");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|r| r.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn find_by_match_and_player(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<Option<Registration>> {
        let timer = QueryTimer::new("find_registration_by_match_and_player");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE match_id = $1 AND player_id = $2"
        ))
        .bind(match_id)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|r| r.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<Registration>> {
        let timer = QueryTimer::new("find_registration_by_token");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE access_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|r| r.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn token_exists(&self, token: &str) -> DomainResult<bool> {
        let timer = QueryTimer::new("registration_token_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE access_token = $1)",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await;
        timer.finish(&result);
        result.map_err(map_sqlx_error)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: RegistrationStatus,
        to: RegistrationStatus,
    ) -> DomainResult<Option<Registration>> {
        let timer = QueryTimer::new("transition_registration_status");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            UPDATE registrations SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(RegistrationStatusDb::from(from))
        .bind(RegistrationStatusDb::from(to))
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|r| r.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn confirm_payment(&self, id: Uuid) -> DomainResult<Option<Registration>> {
        let timer = QueryTimer::new("confirm_registration_payment");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            UPDATE registrations
            SET payment_status = 'paid', status = 'confirmed', updated_at = NOW()
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&result);
        result.map(|r| r.map(Into::into)).map_err(map_sqlx_error)
    }

    async fn try_check_in(&self, token: &str) -> DomainResult<CheckInOutcome> {
        let timer = QueryTimer::new("try_check_in");
        let admitted = sqlx::query_as::<_, CheckedInEntity>(
            r#"
            UPDATE registrations r
            SET check_in_count = r.check_in_count + 1, updated_at = NOW()
            FROM matches m
            WHERE r.access_token = $1
              AND m.id = r.match_id
              AND r.check_in_count < m.check_in_ceiling
            RETURNING r.id, r.match_id, r.player_id, r.status, r.payment_status,
                      r.access_token, r.check_in_count, r.created_at, r.updated_at,
                      m.check_in_ceiling
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&admitted);

        if let Some(row) = admitted.map_err(map_sqlx_error)? {
            return Ok(CheckInOutcome::Admitted {
                registration: row.registration.into(),
                check_in_ceiling: row.check_in_ceiling,
            });
        }

        let timer = QueryTimer::new("find_check_in_state");
        let state = sqlx::query_as::<_, CheckInStateEntity>(
            r#"
            SELECT r.check_in_count, m.check_in_ceiling
            FROM registrations r
            JOIN matches m ON m.id = r.match_id
            WHERE r.access_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(&state);

        Ok(match state.map_err(map_sqlx_error)? {
            Some(state) => CheckInOutcome::LimitReached {
                check_in_count: state.check_in_count,
                check_in_ceiling: state.check_in_ceiling,
            },
            None => CheckInOutcome::UnknownToken,
        })
    }

    async fn roster(&self, match_id: Uuid) -> DomainResult<Vec<RosterEntry>> {
        let timer = QueryTimer::new("registration_roster");
        let result = sqlx::query_as::<_, RosterEntryEntity>(
            r#"
            SELECT r.id AS registration_id, p.id AS player_id, p.display_name, p.email,
                   r.status, r.payment_status, r.check_in_count
            FROM registrations r
            JOIN players p ON p.id = r.player_id
            WHERE r.match_id = $1
            ORDER BY r.created_at ASC
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

    async fn list_by_player(&self, player_id: Uuid) -> DomainResult<Vec<Registration>> {
        let timer = QueryTimer::new("list_registrations_by_player");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE player_id = $1 ORDER BY created_at ASC"
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
