//! Door access: token issuance and bounded check-in.

use shared::crypto::{generate_access_token, token_fingerprint};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::{CheckInOutcome, CheckInReceipt};
use crate::store::{MatchStore, PlayerStore, RegistrationStore};

/// Attempts before giving up on finding an unused token.
const MAX_TOKEN_ATTEMPTS: usize = 10;

/// Issues access tokens that no existing registration holds.
#[derive(Clone)]
pub struct AccessTokenIssuer {
    registrations: Arc<dyn RegistrationStore>,
}

impl AccessTokenIssuer {
    pub fn new(registrations: Arc<dyn RegistrationStore>) -> Self {
        Self { registrations }
    }

    pub async fn issue(&self) -> DomainResult<String> {
        self.issue_with(generate_access_token).await
    }

    async fn issue_with<F>(&self, generator: F) -> DomainResult<String>
    where
        F: Fn() -> String + Send + Sync,
    {
        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let token = generator();
            if !self.registrations.token_exists(&token).await? {
                return Ok(token);
            }
            warn!(fingerprint = %token_fingerprint(&token), "Access token collision, regenerating");
        }
        Err(DomainError::Storage(
            "Could not generate a unique access token".to_string(),
        ))
    }
}

/// Validates and consumes access tokens at the door.
pub struct AccessControlGate {
    registrations: Arc<dyn RegistrationStore>,
    matches: Arc<dyn MatchStore>,
    players: Arc<dyn PlayerStore>,
}

impl AccessControlGate {
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        matches: Arc<dyn MatchStore>,
        players: Arc<dyn PlayerStore>,
    ) -> Self {
        Self {
            registrations,
            matches,
            players,
        }
    }

    /// Admits the holder of `token` once, bounded by the match's check-in
    /// ceiling. Independent of registration and payment status.
    pub async fn check_in(&self, token: &str) -> DomainResult<CheckInReceipt> {
        let fingerprint = token_fingerprint(token);
        let (registration, check_in_ceiling) = match self.registrations.try_check_in(token).await? {
            CheckInOutcome::Admitted {
                registration,
                check_in_ceiling,
            } => (registration, check_in_ceiling),
            CheckInOutcome::LimitReached {
                check_in_count,
                check_in_ceiling,
            } => {
                info!(fingerprint = %fingerprint, check_in_count, "Check-in refused, limit reached");
                return Err(DomainError::CheckInLimitReached {
                    check_in_count,
                    check_in_ceiling,
                });
            }
            CheckInOutcome::UnknownToken => {
                info!(fingerprint = %fingerprint, "Check-in refused, unknown token");
                return Err(DomainError::NotFound("Access token not recognized".to_string()));
            }
        };

        let player = self
            .players
            .find_by_id(registration.player_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Player", registration.player_id))?;

        info!(
            registration_id = %registration.id,
            match_id = %registration.match_id,
            check_in_count = registration.check_in_count,
            check_in_ceiling,
            "Player checked in"
        );

        Ok(CheckInReceipt {
            registration_id: registration.id,
            match_id: registration.match_id,
            player_name: player.display_name,
            check_in_count: registration.check_in_count,
            check_in_ceiling,
        })
    }

    /// Check-in performed by a door operator, who must moderate the match the
    /// token belongs to.
    pub async fn check_in_by(&self, operator_id: Uuid, token: &str) -> DomainResult<CheckInReceipt> {
        let registration = self
            .registrations
            .find_by_token(token)
            .await?
            .ok_or_else(|| DomainError::NotFound("Access token not recognized".to_string()))?;
        let sports_match = self
            .matches
            .find_by_id(registration.match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", registration.match_id))?;
        if !sports_match.is_moderated_by(operator_id) {
            return Err(DomainError::not_allowed(
                "Only the match moderator can check players in",
            ));
        }

        self.check_in(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::Harness;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_check_in_up_to_ceiling() {
        let h = Harness::new();
        let moderator = h.player("Mod").await;
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&moderator, 0, 3).await;
        let registration = h.registrations.register(sports_match.id, ana.id).await.unwrap();

        for expected in 1..=3 {
            let receipt = h.gate.check_in(&registration.access_token).await.unwrap();
            assert_eq!(receipt.player_name, "Ana");
            assert_eq!(receipt.check_in_count, expected);
            assert_eq!(receipt.check_in_ceiling, 3);
        }

        let refused = h.gate.check_in(&registration.access_token).await;
        assert_eq!(
            refused.unwrap_err(),
            DomainError::CheckInLimitReached {
                check_in_count: 3,
                check_in_ceiling: 3,
            }
        );

        let stored = h.registrations.get(registration.id).await.unwrap();
        assert_eq!(stored.check_in_count, 3);
    }

    #[tokio::test]
    async fn test_check_in_unknown_token() {
        let h = Harness::new();
        let result = h.gate.check_in("not-a-token").await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_check_in_ignores_review_status() {
        let h = Harness::new();
        let moderator = h.player("Mod").await;
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&moderator, 2500, 1).await;
        let registration = h.registrations.register(sports_match.id, ana.id).await.unwrap();
        h.registrations.decline(registration.id).await.unwrap();

        let receipt = h.gate.check_in(&registration.access_token).await.unwrap();
        assert_eq!(receipt.check_in_count, 1);
    }

    #[tokio::test]
    async fn test_check_in_by_requires_moderator() {
        let h = Harness::new();
        let moderator = h.player("Mod").await;
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&moderator, 0, 1).await;
        let registration = h.registrations.register(sports_match.id, ana.id).await.unwrap();

        let by_player = h.gate.check_in_by(ana.id, &registration.access_token).await;
        assert!(matches!(by_player, Err(DomainError::NotAllowed(_))));

        let by_moderator = h
            .gate
            .check_in_by(moderator.id, &registration.access_token)
            .await
            .unwrap();
        assert_eq!(by_moderator.check_in_count, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_check_in_admits_once() {
        let h = Arc::new(Harness::new());
        let moderator = h.player("Mod").await;
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&moderator, 0, 1).await;
        let registration = h.registrations.register(sports_match.id, ana.id).await.unwrap();

        let scans: Vec<_> = (0..2)
            .map(|_| {
                let h = h.clone();
                let token = registration.access_token.clone();
                tokio::spawn(async move { h.gate.check_in(&token).await })
            })
            .collect();

        let mut admitted = 0;
        let mut refused = 0;
        for scan in scans {
            match scan.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(DomainError::CheckInLimitReached { .. }) => refused += 1,
                Err(other) => panic!("Unexpected error: {:?}", other),
            }
        }
        assert_eq!((admitted, refused), (1, 1));
        assert_eq!(
            h.registrations.get(registration.id).await.unwrap().check_in_count,
            1
        );
    }

    #[tokio::test]
    async fn test_issuer_regenerates_on_collision() {
        let h = Harness::new();
        let moderator = h.player("Mod").await;
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&moderator, 0, 1).await;
        let registration = h.registrations.register(sports_match.id, ana.id).await.unwrap();

        let issuer = AccessTokenIssuer::new(h.stores.registrations.clone());
        let taken = registration.access_token.clone();
        let calls = AtomicUsize::new(0);
        let token = issuer
            .issue_with(|| {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    taken.clone()
                } else {
                    "fresh-token".to_string()
                }
            })
            .await
            .unwrap();
        assert_eq!(token, "fresh-token");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_issuer_gives_up() {
        let h = Harness::new();
        let moderator = h.player("Mod").await;
        let ana = h.player("Ana").await;
        let sports_match = h.open_match(&moderator, 0, 1).await;
        let registration = h.registrations.register(sports_match.id, ana.id).await.unwrap();

        let issuer = AccessTokenIssuer::new(h.stores.registrations.clone());
        let taken = registration.access_token.clone();
        let result = issuer.issue_with(|| taken.clone()).await;
        assert!(matches!(result, Err(DomainError::Storage(_))));
    }
}
