//! Completion certificate data handed to the document renderer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::registration::Registration;
use super::sports_match::Match;

/// True iff the match is finished and the registration was scanned at the door.
pub fn is_certificate_eligible(registration: &Registration, sports_match: &Match) -> bool {
    sports_match.is_finished() && registration.check_in_count > 0
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Certificate {
    pub registration_id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub match_id: Uuid,
    pub match_title: String,
    pub match_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub check_in_count: i32,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EligibilityResponse {
    pub registration_id: Uuid,
    pub eligible: bool,
}
