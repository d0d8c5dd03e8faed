//! Moderator invitations.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::registration::RegistrationService;
use crate::error::{DomainError, DomainResult};
use crate::models::{
    Invitation, InvitationAcceptance, InvitationStatus, Match, NewInvitation, RegistrationStatus,
};
use crate::store::{InvitationStore, MatchStore, PlayerStore};

pub struct InvitationService {
    invitations: Arc<dyn InvitationStore>,
    matches: Arc<dyn MatchStore>,
    players: Arc<dyn PlayerStore>,
    registrations: Arc<RegistrationService>,
}

impl InvitationService {
    pub fn new(
        invitations: Arc<dyn InvitationStore>,
        matches: Arc<dyn MatchStore>,
        players: Arc<dyn PlayerStore>,
        registrations: Arc<RegistrationService>,
    ) -> Self {
        Self {
            invitations,
            matches,
            players,
            registrations,
        }
    }

    /// Invites the player named `recipient_name` to `match_id`, or to the
    /// sender's most recent open match when no match is given.
    pub async fn invite(
        &self,
        sender_id: Uuid,
        recipient_name: &str,
        match_id: Option<Uuid>,
    ) -> DomainResult<Invitation> {
        if self.players.find_by_id(sender_id).await?.is_none() {
            return Err(DomainError::not_found("Player", sender_id));
        }
        let recipient = self
            .players
            .find_by_display_name(recipient_name.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("Player", recipient_name.trim()))?;
        let sports_match = self.target_match(sender_id, match_id).await?;

        if recipient.id == sender_id {
            return Err(DomainError::not_allowed("Cannot invite yourself"));
        }
        if self
            .invitations
            .pending_exists(sender_id, recipient.id, sports_match.id)
            .await?
        {
            return Err(DomainError::conflict(
                "A pending invitation already exists for this player",
            ));
        }

        let invitation = self
            .invitations
            .insert(NewInvitation {
                sender_id,
                recipient_id: recipient.id,
                match_id: sports_match.id,
            })
            .await?;

        info!(
            invitation_id = %invitation.id,
            match_id = %sports_match.id,
            sender_id = %sender_id,
            recipient_id = %recipient.id,
            "Invitation sent"
        );
        Ok(invitation)
    }

    /// Accepts the invitation and admits the recipient to the match.
    pub async fn accept(
        &self,
        invitation_id: Uuid,
        acting_player_id: Uuid,
    ) -> DomainResult<InvitationAcceptance> {
        let pending = self.pending_for(invitation_id, acting_player_id).await?;

        let sports_match = self
            .matches
            .find_by_id(pending.match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", pending.match_id))?;
        if !sports_match.is_open() {
            return Err(DomainError::not_allowed(format!(
                "Match is {} and not accepting registrations",
                sports_match.status
            )));
        }

        // A declined registration cannot be admitted; leave the invitation pending.
        if let Some(existing) = self
            .registrations
            .find_for_player(pending.match_id, pending.recipient_id)
            .await?
        {
            if existing.status == RegistrationStatus::Declined {
                return Err(DomainError::conflict(
                    "Registration for this match was declined",
                ));
            }
        }

        let invitation = self
            .invitations
            .resolve(invitation_id, InvitationStatus::Accepted)
            .await?
            .ok_or_else(|| DomainError::not_allowed("Invitation is no longer pending"))?;
        let (registration, registration_created) = self
            .registrations
            .admit_invited(invitation.match_id, invitation.recipient_id)
            .await?;

        info!(
            invitation_id = %invitation.id,
            registration_id = %registration.id,
            registration_created,
            "Invitation accepted"
        );
        Ok(InvitationAcceptance {
            invitation,
            registration,
            registration_created,
        })
    }

    pub async fn reject(&self, invitation_id: Uuid, acting_player_id: Uuid) -> DomainResult<Invitation> {
        self.pending_for(invitation_id, acting_player_id).await?;

        let invitation = self
            .invitations
            .resolve(invitation_id, InvitationStatus::Rejected)
            .await?
            .ok_or_else(|| DomainError::not_allowed("Invitation is no longer pending"))?;

        info!(invitation_id = %invitation.id, "Invitation rejected");
        Ok(invitation)
    }

    pub async fn list_received(&self, player_id: Uuid) -> DomainResult<Vec<Invitation>> {
        self.invitations.list_received(player_id).await
    }

    pub async fn list_sent(&self, player_id: Uuid) -> DomainResult<Vec<Invitation>> {
        self.invitations.list_sent(player_id).await
    }

    async fn target_match(&self, sender_id: Uuid, match_id: Option<Uuid>) -> DomainResult<Match> {
        let Some(match_id) = match_id else {
            return self
                .matches
                .find_open_by_moderator(sender_id)
                .await?
                .ok_or_else(|| DomainError::NotFound("No open match to invite to".to_string()));
        };

        let sports_match = self
            .matches
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match", match_id))?;
        if !sports_match.is_moderated_by(sender_id) {
            return Err(DomainError::not_allowed(
                "Only the match moderator can send invitations",
            ));
        }
        if !sports_match.is_open() {
            return Err(DomainError::not_allowed("Match is not open"));
        }
        Ok(sports_match)
    }

    async fn pending_for(&self, invitation_id: Uuid, acting_player_id: Uuid) -> DomainResult<Invitation> {
        let invitation = self
            .invitations
            .find_by_id(invitation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Invitation", invitation_id))?;
        if invitation.recipient_id != acting_player_id {
            return Err(DomainError::not_allowed(
                "Invitation is addressed to another player",
            ));
        }
        if invitation.status != InvitationStatus::Pending {
            return Err(DomainError::not_allowed(format!(
                "Invitation is already {}",
                invitation.status
            )));
        }
        Ok(invitation)
    }
}
