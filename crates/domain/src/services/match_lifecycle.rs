//! Match lifecycle: opening, status changes and descriptive edits.
//!
//! Status transitions are unrestricted between Open, Closed and Finished.
//! New registrations are only admitted while a match is Open, which the
//! registration service checks against the status held here.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::{Match, MatchChanges, MatchStatus, NewMatch};
use crate::store::{MatchStore, PlayerStore};

pub struct MatchService {
    matches: Arc<dyn MatchStore>,
    players: Arc<dyn PlayerStore>,
}

impl MatchService {
    pub fn new(matches: Arc<dyn MatchStore>, players: Arc<dyn PlayerStore>) -> Self {
        Self { matches, players }
    }

    /// Opens a match owned by `new_match.moderator_id` and flags that player
    /// as a moderator.
    pub async fn open(&self, new_match: NewMatch) -> DomainResult<Match> {
        validate_config(
            Some(&new_match.match_type),
            Some(&new_match.title),
            Some(new_match.price_cents),
            Some(new_match.check_in_ceiling),
        )?;

        let moderator = self
            .players
            .find_by_id(new_match.moderator_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Player", new_match.moderator_id))?;

        let sports_match = self.matches.insert(new_match).await?;
        if !moderator.is_moderator {
            self.players.set_moderator(moderator.id, true).await?;
        }

        info!(
            match_id = %sports_match.id,
            moderator_id = %moderator.id,
            price_cents = sports_match.price_cents,
            check_in_ceiling = sports_match.check_in_ceiling,
            "Match opened"
        );
        Ok(sports_match)
    }

    pub async fn set_status(&self, match_id: Uuid, status: MatchStatus) -> DomainResult<Match> {
        let sports_match = self
            .matches
            .set_status(match_id, status)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", match_id))?;

        info!(match_id = %match_id, status = %status, "Match status changed");
        Ok(sports_match)
    }

    pub async fn update_details(&self, match_id: Uuid, changes: MatchChanges) -> DomainResult<Match> {
        validate_config(
            changes.match_type.as_deref(),
            changes.title.as_deref(),
            changes.price_cents,
            changes.check_in_ceiling,
        )?;
        if changes.is_empty() {
            return self.get(match_id).await;
        }

        let sports_match = self
            .matches
            .update_details(match_id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", match_id))?;

        info!(match_id = %match_id, "Match details updated");
        Ok(sports_match)
    }

    pub async fn get(&self, match_id: Uuid) -> DomainResult<Match> {
        self.matches
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", match_id))
    }

    pub async fn list_open(&self) -> DomainResult<Vec<Match>> {
        self.matches.list_by_status(MatchStatus::Open).await
    }

    pub async fn list_moderated_by(&self, player_id: Uuid) -> DomainResult<Vec<Match>> {
        self.matches.list_by_moderator(player_id).await
    }

    /// Resolves the match and checks that `acting` owns it.
    pub async fn ensure_moderator(&self, match_id: Uuid, acting: Uuid) -> DomainResult<Match> {
        let sports_match = self.get(match_id).await?;
        if !sports_match.is_moderated_by(acting) {
            return Err(DomainError::not_allowed(
                "Only the match moderator can perform this action",
            ));
        }
        Ok(sports_match)
    }
}

fn validate_config(
    match_type: Option<&str>,
    title: Option<&str>,
    price_cents: Option<i64>,
    check_in_ceiling: Option<i32>,
) -> DomainResult<()> {
    if match_type.is_some_and(|t| t.trim().is_empty()) {
        return Err(DomainError::validation("Match type cannot be empty"));
    }
    if title.is_some_and(|t| t.trim().is_empty()) {
        return Err(DomainError::validation("Title cannot be empty"));
    }
    if price_cents.is_some_and(|p| p < 0) {
        return Err(DomainError::validation("Price cannot be negative"));
    }
    if check_in_ceiling.is_some_and(|c| c < 1) {
        return Err(DomainError::validation("Check-in ceiling must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{new_match, Harness};

    #[tokio::test]
    async fn test_open_sets_moderator_flag() {
        let h = Harness::new();
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&ana, 0, 1).await;

        assert_eq!(sports_match.status, MatchStatus::Open);
        assert!(sports_match.is_moderated_by(ana.id));
        assert!(h.players.get(ana.id).await.unwrap().is_moderator);
    }

    #[tokio::test]
    async fn test_open_unknown_moderator() {
        let h = Harness::new();
        let ghost = h.player("Ghost").await;
        let mut config = new_match(&ghost, 0, 1);
        config.moderator_id = Uuid::new_v4();
        let result = h.matches.open(config).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_config() {
        let h = Harness::new();
        let ana = h.player("Ana").await;

        let negative_price = h.matches.open(new_match(&ana, -1, 1)).await;
        assert!(matches!(negative_price, Err(DomainError::Validation(_))));

        let zero_ceiling = h.matches.open(new_match(&ana, 0, 0)).await;
        assert!(matches!(zero_ceiling, Err(DomainError::Validation(_))));

        let mut blank_title = new_match(&ana, 0, 1);
        blank_title.title = "   ".to_string();
        let result = h.matches.open(blank_title).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_status_transitions_unrestricted() {
        let h = Harness::new();
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&ana, 0, 1).await;

        for status in [
            MatchStatus::Finished,
            MatchStatus::Open,
            MatchStatus::Closed,
            MatchStatus::Finished,
        ] {
            let updated = h.matches.set_status(sports_match.id, status).await.unwrap();
            assert_eq!(updated.status, status);
        }

        let missing = h.matches.set_status(Uuid::new_v4(), MatchStatus::Closed).await;
        assert!(matches!(missing, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ensure_moderator() {
        let h = Harness::new();
        let ana = h.player("Ana").await;
        let bea = h.player("Bea").await;
        let sports_match = h.open_match(&ana, 0, 1).await;

        assert!(h.matches.ensure_moderator(sports_match.id, ana.id).await.is_ok());
        assert!(matches!(
            h.matches.ensure_moderator(sports_match.id, bea.id).await,
            Err(DomainError::NotAllowed(_))
        ));
        assert!(matches!(
            h.matches.ensure_moderator(Uuid::new_v4(), ana.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_details() {
        let h = Harness::new();
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&ana, 0, 1).await;

        let updated = h
            .matches
            .update_details(
                sports_match.id,
                MatchChanges {
                    title: Some("Friday game".to_string()),
                    check_in_ceiling: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Friday game");
        assert_eq!(updated.check_in_ceiling, 3);
        assert_eq!(updated.match_type, "football");

        let invalid = h
            .matches
            .update_details(
                sports_match.id,
                MatchChanges {
                    price_cents: Some(-5),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(invalid, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_open_and_moderated() {
        let h = Harness::new();
        let ana = h.player("Ana").await;
        let first = h.open_match(&ana, 0, 1).await;
        let second = h.open_match(&ana, 500, 2).await;
        h.matches
            .set_status(first.id, MatchStatus::Closed)
            .await
            .unwrap();

        let open = h.matches.list_open().await.unwrap();
        assert_eq!(open.iter().map(|m| m.id).collect::<Vec<_>>(), vec![second.id]);
        assert_eq!(h.matches.list_moderated_by(ana.id).await.unwrap().len(), 2);
    }
}
