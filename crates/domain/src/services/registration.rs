//! Registration state machine.
//!
//! ```text
//! Pending --accept--> Accepted --confirm_payment--> Confirmed
//!    \--decline--> Declined (terminal)
//! ```
//!
//! Every status change is a conditional update on the current status, so two
//! racing reviewers cannot both succeed.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::access_control::AccessTokenIssuer;
use crate::error::{DomainError, DomainResult};
use crate::models::{
    Match, NewRegistration, PaymentStatus, Registration, RegistrationStatus, RosterEntry,
};
use crate::store::{MatchStore, PlayerStore, RegistrationStore};

pub struct RegistrationService {
    registrations: Arc<dyn RegistrationStore>,
    matches: Arc<dyn MatchStore>,
    players: Arc<dyn PlayerStore>,
    tokens: AccessTokenIssuer,
}

impl RegistrationService {
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        matches: Arc<dyn MatchStore>,
        players: Arc<dyn PlayerStore>,
        tokens: AccessTokenIssuer,
    ) -> Self {
        Self {
            registrations,
            matches,
            players,
            tokens,
        }
    }

    /// Registers a player for an open match with a fresh access token.
    pub async fn register(&self, match_id: Uuid, player_id: Uuid) -> DomainResult<Registration> {
        let sports_match = self.find_match(match_id).await?;
        if self.players.find_by_id(player_id).await?.is_none() {
            return Err(DomainError::not_found("Player", player_id));
        }
        if !sports_match.is_open() {
            return Err(DomainError::not_allowed(format!(
                "Match is {} and not accepting registrations",
                sports_match.status
            )));
        }
        if self
            .registrations
            .find_by_match_and_player(match_id, player_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                "Player is already registered for this match",
            ));
        }

        let access_token = self.tokens.issue().await?;
        let registration = self
            .registrations
            .insert(NewRegistration {
                match_id,
                player_id,
                payment_status: PaymentStatus::for_price(sports_match.price_cents),
                access_token,
            })
            .await?;

        info!(
            registration_id = %registration.id,
            match_id = %match_id,
            player_id = %player_id,
            payment_status = %registration.payment_status,
            "Registration created"
        );
        Ok(registration)
    }

    pub async fn accept(&self, registration_id: Uuid) -> DomainResult<Registration> {
        self.review(registration_id, RegistrationStatus::Accepted).await
    }

    pub async fn decline(&self, registration_id: Uuid) -> DomainResult<Registration> {
        self.review(registration_id, RegistrationStatus::Declined).await
    }

    /// Records the moderator's payment attestation. Idempotent.
    pub async fn confirm_payment(&self, registration_id: Uuid) -> DomainResult<Registration> {
        let registration = self
            .registrations
            .confirm_payment(registration_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Registration", registration_id))?;

        info!(registration_id = %registration_id, "Payment confirmed");
        Ok(registration)
    }

    pub async fn get(&self, registration_id: Uuid) -> DomainResult<Registration> {
        self.registrations
            .find_by_id(registration_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Registration", registration_id))
    }

    pub async fn find_for_player(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<Option<Registration>> {
        self.registrations
            .find_by_match_and_player(match_id, player_id)
            .await
    }

    pub async fn roster(&self, match_id: Uuid) -> DomainResult<Vec<RosterEntry>> {
        self.find_match(match_id).await?;
        self.registrations.roster(match_id).await
    }

    pub async fn list_for_player(&self, player_id: Uuid) -> DomainResult<Vec<Registration>> {
        self.registrations.list_by_player(player_id).await
    }

    /// Resolves a registration together with its match, for callers that
    /// must be the match moderator.
    pub async fn get_moderated(
        &self,
        registration_id: Uuid,
        acting: Uuid,
    ) -> DomainResult<(Registration, Match)> {
        let registration = self.get(registration_id).await?;
        let sports_match = self.find_match(registration.match_id).await?;
        if !sports_match.is_moderated_by(acting) {
            return Err(DomainError::not_allowed(
                "Only the match moderator can review registrations",
            ));
        }
        Ok((registration, sports_match))
    }

    /// Resolves a registration visible to `acting`: its holder or the match
    /// moderator.
    pub async fn get_visible(
        &self,
        registration_id: Uuid,
        acting: Uuid,
    ) -> DomainResult<Registration> {
        let registration = self.get(registration_id).await?;
        if registration.player_id == acting {
            return Ok(registration);
        }
        let sports_match = self.find_match(registration.match_id).await?;
        if !sports_match.is_moderated_by(acting) {
            return Err(DomainError::not_allowed(
                "Registration belongs to another player",
            ));
        }
        Ok(registration)
    }

    /// Admits an invited player: registers them if needed and promotes the
    /// registration to Accepted. Safe to repeat. The flag is true when this
    /// call created the registration.
    pub async fn admit_invited(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<(Registration, bool)> {
        let (registration, created) = match self
            .registrations
            .find_by_match_and_player(match_id, player_id)
            .await?
        {
            Some(existing) => (existing, false),
            None => match self.register(match_id, player_id).await {
                Ok(created) => (created, true),
                Err(DomainError::Conflict(_)) => (self.existing(match_id, player_id).await?, false),
                Err(e) => return Err(e),
            },
        };

        self.promote_invited(registration)
            .await
            .map(|registration| (registration, created))
    }

    async fn promote_invited(&self, registration: Registration) -> DomainResult<Registration> {
        match registration.status {
            RegistrationStatus::Accepted | RegistrationStatus::Confirmed => Ok(registration),
            RegistrationStatus::Declined => Err(DomainError::conflict(
                "Registration for this match was declined",
            )),
            RegistrationStatus::Pending => {
                match self
                    .registrations
                    .transition_status(
                        registration.id,
                        RegistrationStatus::Pending,
                        RegistrationStatus::Accepted,
                    )
                    .await?
                {
                    Some(accepted) => {
                        info!(registration_id = %accepted.id, "Invited registration accepted");
                        Ok(accepted)
                    }
                    // Reviewed concurrently; report whatever it became.
                    None => {
                        let current = self.get(registration.id).await?;
                        match current.status {
                            RegistrationStatus::Declined => Err(DomainError::conflict(
                                "Registration for this match was declined",
                            )),
                            _ => Ok(current),
                        }
                    }
                }
            }
        }
    }

    async fn review(
        &self,
        registration_id: Uuid,
        to: RegistrationStatus,
    ) -> DomainResult<Registration> {
        let current = self.get(registration_id).await?;
        if current.status != RegistrationStatus::Pending {
            return Err(DomainError::not_allowed(format!(
                "Registration is {} and can no longer be reviewed",
                current.status
            )));
        }

        let registration = self
            .registrations
            .transition_status(registration_id, RegistrationStatus::Pending, to)
            .await?
            .ok_or_else(|| {
                DomainError::not_allowed("Registration was reviewed concurrently")
            })?;

        info!(registration_id = %registration_id, status = %to, "Registration reviewed");
        Ok(registration)
    }

    async fn existing(&self, match_id: Uuid, player_id: Uuid) -> DomainResult<Registration> {
        self.registrations
            .find_by_match_and_player(match_id, player_id)
            .await?
            .ok_or_else(|| DomainError::Storage("Registration vanished after conflict".to_string()))
    }

    async fn find_match(&self, match_id: Uuid) -> DomainResult<Match> {
        self.matches
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", match_id))
    }
}
