//! Registration entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{PaymentStatus, Registration, RegistrationStatus, RosterEntry};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for registration_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
pub enum RegistrationStatusDb {
    Pending,
    Accepted,
    Declined,
    Confirmed,
}

impl From<RegistrationStatusDb> for RegistrationStatus {
    fn from(status: RegistrationStatusDb) -> Self {
        match status {
            RegistrationStatusDb::Pending => RegistrationStatus::Pending,
            RegistrationStatusDb::Accepted => RegistrationStatus::Accepted,
            RegistrationStatusDb::Declined => RegistrationStatus::Declined,
            RegistrationStatusDb::Confirmed => RegistrationStatus::Confirmed,
        }
    }
}

impl From<RegistrationStatus> for RegistrationStatusDb {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Pending => RegistrationStatusDb::Pending,
            RegistrationStatus::Accepted => RegistrationStatusDb::Accepted,
            RegistrationStatus::Declined => RegistrationStatusDb::Declined,
            RegistrationStatus::Confirmed => RegistrationStatusDb::Confirmed,
        }
    }
}

/// Database enum for payment_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
pub enum PaymentStatusDb {
    Awaiting,
    Paid,
    Free,
}

impl From<PaymentStatusDb> for PaymentStatus {
    fn from(status: PaymentStatusDb) -> Self {
        match status {
            PaymentStatusDb::Awaiting => PaymentStatus::Awaiting,
            PaymentStatusDb::Paid => PaymentStatus::Paid,
            PaymentStatusDb::Free => PaymentStatus::Free,
        }
    }
}

impl From<PaymentStatus> for PaymentStatusDb {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Awaiting => PaymentStatusDb::Awaiting,
            PaymentStatus::Paid => PaymentStatusDb::Paid,
            PaymentStatus::Free => PaymentStatusDb::Free,
        }
    }
}

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub status: RegistrationStatusDb,
    pub payment_status: PaymentStatusDb,
    pub access_token: String,
    pub check_in_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegistrationEntity> for Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Self {
            id: entity.id,
            match_id: entity.match_id,
            player_id: entity.player_id,
            status: entity.status.into(),
            payment_status: entity.payment_status.into(),
            access_token: entity.access_token,
            check_in_count: entity.check_in_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Registration joined with its player, for rosters.
#[derive(Debug, Clone, FromRow)]
pub struct RosterEntryEntity {
    pub registration_id: Uuid,
    pub player_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub status: RegistrationStatusDb,
    pub payment_status: PaymentStatusDb,
    pub check_in_count: i32,
}

impl From<RosterEntryEntity> for RosterEntry {
    fn from(entity: RosterEntryEntity) -> Self {
        Self {
            registration_id: entity.registration_id,
            player_id: entity.player_id,
            display_name: entity.display_name,
            email: entity.email,
            status: entity.status.into(),
            payment_status: entity.payment_status.into(),
            check_in_count: entity.check_in_count,
        }
    }
}

/// Registration returned by a successful check-in, with its match's ceiling.
#[derive(Debug, Clone, FromRow)]
pub struct CheckedInEntity {
    #[sqlx(flatten)]
    pub registration: RegistrationEntity,
    pub check_in_ceiling: i32,
}

/// Counter and ceiling of a token that was refused admission.
#[derive(Debug, Clone, FromRow)]
pub struct CheckInStateEntity {
    pub check_in_count: i32,
    pub check_in_ceiling: i32,
}
