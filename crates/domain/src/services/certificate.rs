//! Completion certificates for players who attended a finished match.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::{is_certificate_eligible, Certificate, Match, Registration};
use crate::store::{MatchStore, PlayerStore, RegistrationStore};

pub struct CertificateService {
    registrations: Arc<dyn RegistrationStore>,
    matches: Arc<dyn MatchStore>,
    players: Arc<dyn PlayerStore>,
}

impl CertificateService {
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

    pub async fn is_eligible(&self, registration_id: Uuid) -> DomainResult<bool> {
        let (registration, sports_match) = self.load(registration_id).await?;
        Ok(is_certificate_eligible(&registration, &sports_match))
    }

    /// Data the document renderer needs for an eligible registration.
    pub async fn certificate(&self, registration_id: Uuid) -> DomainResult<Certificate> {
        let (registration, sports_match) = self.load(registration_id).await?;
        if !is_certificate_eligible(&registration, &sports_match) {
            return Err(DomainError::not_allowed(
                "Certificates require a finished match and at least one check-in",
            ));
        }

        let player = self
            .players
            .find_by_id(registration.player_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Player", registration.player_id))?;

        info!(registration_id = %registration.id, "Certificate issued");
        Ok(Certificate {
            registration_id: registration.id,
            player_id: player.id,
            player_name: player.display_name,
            match_id: sports_match.id,
            match_title: sports_match.title,
            match_type: sports_match.match_type,
            scheduled_at: sports_match.scheduled_at,
            check_in_count: registration.check_in_count,
            issued_at: Utc::now(),
        })
    }

    async fn load(&self, registration_id: Uuid) -> DomainResult<(Registration, Match)> {
        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Registration", registration_id))?;
        let sports_match = self
            .matches
            .find_by_id(registration.match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", registration.match_id))?;
        Ok((registration, sports_match))
    }
}
