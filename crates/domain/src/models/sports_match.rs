//! Match domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Default number of door scans a registration may be redeemed for.
pub const DEFAULT_CHECK_IN_CEILING: i32 = 1;

/// Coarse lifecycle status of a match.
///
/// The three states are mutually reachable; a moderator may reopen a closed
/// match or finish an open one directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Open,
    Closed,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Open => "open",
            MatchStatus::Closed => "closed",
            MatchStatus::Finished => "finished",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(MatchStatus::Open),
            "closed" => Ok(MatchStatus::Closed),
            "finished" => Ok(MatchStatus::Finished),
            _ => Err(format!("Invalid match status: {}", s)),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled sporting event a moderator opens for sign-ups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Match {
    pub id: Uuid,
    pub moderator_id: Uuid,
    pub match_type: String,
    pub title: String,
    pub location: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub status: MatchStatus,
    /// Entry price in cents; zero means free.
    pub price_cents: i64,
    pub payout_key: Option<String>,
    pub check_in_ceiling: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn is_open(&self) -> bool {
        self.status == MatchStatus::Open
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    pub fn is_moderated_by(&self, player_id: Uuid) -> bool {
        self.moderator_id == player_id
    }
}

/// Data needed to persist a new match. Always created Open.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub moderator_id: Uuid,
    pub match_type: String,
    pub title: String,
    pub location: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub price_cents: i64,
    pub payout_key: Option<String>,
    pub check_in_ceiling: i32,
}

/// Descriptive fields a moderator may change after opening.
#[derive(Debug, Clone, Default)]
pub struct MatchChanges {
    pub match_type: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub payout_key: Option<String>,
    pub check_in_ceiling: Option<i32>,
}

impl MatchChanges {
    pub fn is_empty(&self) -> bool {
        self.match_type.is_none()
            && self.title.is_none()
            && self.location.is_none()
            && self.scheduled_at.is_none()
            && self.price_cents.is_none()
            && self.payout_key.is_none()
            && self.check_in_ceiling.is_none()
    }

    /// Applies the changes to a match in place.
    pub fn apply_to(&self, target: &mut Match) {
        if let Some(match_type) = &self.match_type {
            target.match_type = match_type.clone();
        }
        if let Some(title) = &self.title {
            target.title = title.clone();
        }
        if let Some(location) = &self.location {
            target.location = Some(location.clone());
        }
        if let Some(scheduled_at) = self.scheduled_at {
            target.scheduled_at = scheduled_at;
        }
        if let Some(price_cents) = self.price_cents {
            target.price_cents = price_cents;
        }
        if let Some(payout_key) = &self.payout_key {
            target.payout_key = Some(payout_key.clone());
        }
        if let Some(ceiling) = self.check_in_ceiling {
            target.check_in_ceiling = ceiling;
        }
    }
}

/// Request payload for opening a match.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct OpenMatchRequest {
    #[validate(length(min = 1, max = 50, message = "Match type must be between 1 and 50 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub match_type: String,

    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub scheduled_at: DateTime<Utc>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: Option<i64>,

    #[validate(length(max = 140, message = "Payout key must be at most 140 characters"))]
    pub payout_key: Option<String>,

    #[validate(range(min = 1, message = "Check-in ceiling must be at least 1"))]
    pub check_in_ceiling: Option<i32>,
}

impl OpenMatchRequest {
    pub fn into_new_match(self, moderator_id: Uuid) -> NewMatch {
        NewMatch {
            moderator_id,
            match_type: self.match_type.trim().to_string(),
            title: self.title.trim().to_string(),
            location: self.location,
            scheduled_at: self.scheduled_at,
            price_cents: self.price_cents.unwrap_or(0),
            payout_key: self.payout_key,
            check_in_ceiling: self.check_in_ceiling.unwrap_or(DEFAULT_CHECK_IN_CEILING),
        }
    }
}

/// Request payload for editing a match's descriptive fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateMatchRequest {
    #[validate(length(min = 1, max = 50, message = "Match type must be between 1 and 50 characters"))]
    pub match_type: Option<String>,

    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub scheduled_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: Option<i64>,

    #[validate(length(max = 140, message = "Payout key must be at most 140 characters"))]
    pub payout_key: Option<String>,

    #[validate(range(min = 1, message = "Check-in ceiling must be at least 1"))]
    pub check_in_ceiling: Option<i32>,
}

impl From<UpdateMatchRequest> for MatchChanges {
    fn from(request: UpdateMatchRequest) -> Self {
        Self {
            match_type: request.match_type,
            title: request.title,
            location: request.location,
            scheduled_at: request.scheduled_at,
            price_cents: request.price_cents,
            payout_key: request.payout_key,
            check_in_ceiling: request.check_in_ceiling,
        }
    }
}

/// Request payload for changing a match's status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SetMatchStatusRequest {
    pub status: MatchStatus,
}

/// Response for listing matches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMatchesResponse {
    pub data: Vec<Match>,
}
