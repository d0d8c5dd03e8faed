//! Post-match ratings by attendees.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::rating::MAX_SCORE;
use crate::models::{NewRating, Rating, RatingSummary};
use crate::store::{MatchStore, RatingStore, RegistrationStore};

pub struct RatingService {
    ratings: Arc<dyn RatingStore>,
    matches: Arc<dyn MatchStore>,
    registrations: Arc<dyn RegistrationStore>,
}

impl RatingService {
    pub fn new(
        ratings: Arc<dyn RatingStore>,
        matches: Arc<dyn MatchStore>,
        registrations: Arc<dyn RegistrationStore>,
    ) -> Self {
        Self {
            ratings,
            matches,
            registrations,
        }
    }

    /// Rates a finished match. Only players who checked in may rate, once.
    pub async fn rate(
        &self,
        match_id: Uuid,
        player_id: Uuid,
        score: i32,
        comment: Option<String>,
    ) -> DomainResult<Rating> {
        let sports_match = self
            .matches
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", match_id))?;
        if !(0..=MAX_SCORE).contains(&score) {
            return Err(DomainError::validation(format!(
                "Score must be between 0 and {}",
                MAX_SCORE
            )));
        }
        if !sports_match.is_finished() {
            return Err(DomainError::not_allowed("Only finished matches can be rated"));
        }
        let attended = self
            .registrations
            .find_by_match_and_player(match_id, player_id)
            .await?
            .is_some_and(|r| r.check_in_count > 0);
        if !attended {
            return Err(DomainError::not_allowed(
                "Only players who checked in can rate this match",
            ));
        }

        let rating = self
            .ratings
            .insert(NewRating {
                match_id,
                player_id,
                score,
                comment: comment.filter(|c| !c.trim().is_empty()),
            })
            .await?;

        info!(match_id = %match_id, player_id = %player_id, score, "Match rated");
        Ok(rating)
    }

    pub async fn list(&self, match_id: Uuid) -> DomainResult<RatingSummary> {
        if self.matches.find_by_id(match_id).await?.is_none() {
            return Err(DomainError::not_found("Match", match_id));
        }
        let ratings = self.ratings.list_by_match(match_id).await?;
        Ok(RatingSummary::new(match_id, ratings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchStatus;
    use crate::services::fixtures::Harness;

    #[tokio::test]
    async fn test_rate_after_attendance() {
        let h = Harness::new();
        let moderator = h.player("Mod").await;
        let ana = h.player("Ana").await;
        let bea = h.player("Bea").await;
        let sports_match = h.open_match(&moderator, 0, 1).await;
        let registration = h.registrations.register(sports_match.id, ana.id).await.unwrap();
        h.registrations.register(sports_match.id, bea.id).await.unwrap();

        let too_early = h.ratings.rate(sports_match.id, ana.id, 8, None).await;
        assert!(matches!(too_early, Err(DomainError::NotAllowed(_))));

        h.gate.check_in(&registration.access_token).await.unwrap();
        h.matches
            .set_status(sports_match.id, MatchStatus::Finished)
            .await
            .unwrap();

        let absent = h.ratings.rate(sports_match.id, bea.id, 8, None).await;
        assert!(matches!(absent, Err(DomainError::NotAllowed(_))));

        let out_of_range = h.ratings.rate(sports_match.id, ana.id, 11, None).await;
        assert!(matches!(out_of_range, Err(DomainError::Validation(_))));

        let rating = h
            .ratings
            .rate(sports_match.id, ana.id, 8, Some("Great game".to_string()))
            .await
            .unwrap();
        assert_eq!(rating.score, 8);

        let twice = h.ratings.rate(sports_match.id, ana.id, 3, None).await;
        assert!(matches!(twice, Err(DomainError::Conflict(_))));

        let summary = h.ratings.list(sports_match.id).await.unwrap();
        assert_eq!(summary.data.len(), 1);
        assert_eq!(summary.average_score, Some(8.0));
    }

    #[tokio::test]
    async fn test_rate_unknown_match() {
        let h = Harness::new();
        let ana = h.player("Ana").await;
        let result = h.ratings.rate(Uuid::new_v4(), ana.id, 5, None).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
