//! Post-match rating models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Highest score a rating may carry.
pub const MAX_SCORE: i32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Rating {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub score: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRating {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub score: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RateMatchRequest {
    #[validate(range(min = 0, max = 10, message = "Score must be between 0 and 10"))]
    pub score: i32,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

/// Ratings of one match with their average score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RatingSummary {
    pub match_id: Uuid,
    pub average_score: Option<f64>,
    pub data: Vec<Rating>,
}

impl RatingSummary {
    pub fn new(match_id: Uuid, data: Vec<Rating>) -> Self {
        let average_score = if data.is_empty() {
            None
        } else {
            let total: i64 = data.iter().map(|r| r.score as i64).sum();
            Some(total as f64 / data.len() as f64)
        };
        Self {
            match_id,
            average_score,
            data,
        }
    }
}
