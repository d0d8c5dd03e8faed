//! Mapping of sqlx failures onto the domain error taxonomy.

use domain::DomainError;

/// PostgreSQL error code 23505 = unique_violation.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL error code 23503 = foreign_key_violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Converts a sqlx error into a [`DomainError`]. Unique violations become
/// `Conflict`, foreign key violations `NotFound`, anything else `Storage`.
pub fn map_sqlx_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                DomainError::Conflict(conflict_message(db_err.constraint()).to_string())
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                DomainError::NotFound("Referenced resource not found".to_string())
            }
            _ => DomainError::Storage(format!("Database error: {}", db_err)),
        },
        _ => DomainError::Storage(format!("Database error: {}", err)),
    }
}

fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("idx_players_email") => "Email is already registered",
        Some("idx_players_display_name") => "Display name is already taken",
        Some("registrations_match_player_key") => "Player is already registered for this match",
        Some("registrations_access_token_key") => "Access token already issued",
        Some("idx_invitations_pending_unique") => {
            "A pending invitation already exists for this player"
        }
        Some("idx_friend_requests_pair") => "A relation already exists between these players",
        Some("ratings_match_player_key") => "Match already rated by this player",
        _ => "Resource already exists",
    }
}
