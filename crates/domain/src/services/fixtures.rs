//! Shared setup for service tests.

use chrono::{Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use std::sync::Arc;

use super::{
    AccessControlGate, AccessTokenIssuer, CertificateService, InvitationService, MatchService,
    PlayerService, RatingService, RegistrationService, SocialGraph,
};
use crate::models::{Match, NewMatch, NewPlayer, Player};
use crate::store::Stores;

/// Every service wired against one in-memory store.
pub(crate) struct Harness {
    pub stores: Stores,
    pub players: PlayerService,
    pub matches: MatchService,
    pub registrations: Arc<RegistrationService>,
    pub invitations: InvitationService,
    pub gate: AccessControlGate,
    pub certificates: CertificateService,
    pub social: SocialGraph,
    pub ratings: RatingService,
}

impl Harness {
    pub fn new() -> Self {
        let stores = Stores::in_memory();
        let tokens = AccessTokenIssuer::new(stores.registrations.clone());
        let registrations = Arc::new(RegistrationService::new(
            stores.registrations.clone(),
            stores.matches.clone(),
            stores.players.clone(),
            tokens,
        ));
        Self {
            players: PlayerService::new(stores.players.clone()),
            matches: MatchService::new(stores.matches.clone(), stores.players.clone()),
            invitations: InvitationService::new(
                stores.invitations.clone(),
                stores.matches.clone(),
                stores.players.clone(),
                registrations.clone(),
            ),
            gate: AccessControlGate::new(
                stores.registrations.clone(),
                stores.matches.clone(),
                stores.players.clone(),
            ),
            certificates: CertificateService::new(
                stores.registrations.clone(),
                stores.matches.clone(),
                stores.players.clone(),
            ),
            social: SocialGraph::new(
                stores.friend_requests.clone(),
                stores.players.clone(),
                stores.messages.clone(),
            ),
            ratings: RatingService::new(
                stores.ratings.clone(),
                stores.matches.clone(),
                stores.registrations.clone(),
            ),
            registrations,
            stores,
        }
    }

    pub async fn player(&self, display_name: &str) -> Player {
        let email: String = SafeEmail().fake();
        self.players
            .register(NewPlayer {
                display_name: display_name.to_string(),
                email: format!("{}.{}", display_name.to_lowercase(), email),
                password_hash: "$argon2id$test".to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn open_match(&self, moderator: &Player, price_cents: i64, ceiling: i32) -> Match {
        self.matches
            .open(new_match(moderator, price_cents, ceiling))
            .await
            .unwrap()
    }
}

pub(crate) fn new_match(moderator: &Player, price_cents: i64, ceiling: i32) -> NewMatch {
    NewMatch {
        moderator_id: moderator.id,
        match_type: "football".to_string(),
        title: "Thursday five-a-side".to_string(),
        location: Some("North pitch".to_string()),
        scheduled_at: Utc::now() + Duration::days(2),
        price_cents,
        payout_key: None,
        check_in_ceiling: ceiling,
    }
}
