//! In-memory implementation of every store trait.
//!
//! Used by tests and by local runs without a database. All tables live behind
//! one async mutex, so each trait method is a single critical section and the
//! check-then-insert uniqueness checks and the check-in increment are atomic.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    FriendRequestStore, InvitationStore, MatchStore, MessageStore, PlayerStore, RatingStore,
    RegistrationStore,
};
use crate::error::{DomainError, DomainResult};
use crate::models::{
    CheckInOutcome, FriendRequest, FriendRequestStatus, Invitation, InvitationStatus, Match,
    MatchChanges, MatchStatus, Message, NewFriendRequest, NewInvitation, NewMatch, NewMessage,
    NewPlayer, NewRating, NewRegistration, PaymentStatus, Player, ProfileChanges, Rating,
    Registration, RegistrationStatus, RosterEntry,
};

#[derive(Debug, Default)]
struct Tables {
    players: Vec<Player>,
    matches: Vec<Match>,
    registrations: Vec<Registration>,
    invitations: Vec<Invitation>,
    friend_requests: Vec<FriendRequest>,
    ratings: Vec<Rating>,
    messages: Vec<Message>,
}

impl Tables {
    fn display_name_taken(&self, name: &str, except: Option<Uuid>) -> bool {
        self.players
            .iter()
            .any(|p| Some(p.id) != except && p.display_name.eq_ignore_ascii_case(name))
    }

    fn match_by_id(&self, id: Uuid) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    fn registration_mut(&mut self, id: Uuid) -> Option<&mut Registration> {
        self.registrations.iter_mut().find(|r| r.id == id)
    }
}

/// Process-local store for tests and database-less runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStore for InMemoryStore {
    async fn insert(&self, player: NewPlayer) -> DomainResult<Player> {
        let mut tables = self.tables.lock().await;
        if tables.players.iter().any(|p| p.email == player.email) {
            return Err(DomainError::conflict("Email is already registered"));
        }
        if tables.display_name_taken(&player.display_name, None) {
            return Err(DomainError::conflict("Display name is already taken"));
        }

        let now = Utc::now();
        let player = Player {
            id: Uuid::new_v4(),
            display_name: player.display_name,
            email: player.email,
            password_hash: player.password_hash,
            is_moderator: false,
            is_visible: true,
            created_at: now,
            updated_at: now,
        };
        tables.players.push(player.clone());
        Ok(player)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Player>> {
        let tables = self.tables.lock().await;
        Ok(tables.players.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Player>> {
        let tables = self.tables.lock().await;
        Ok(tables.players.iter().find(|p| p.email == email).cloned())
    }

    async fn find_by_display_name(&self, name: &str) -> DomainResult<Option<Player>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .players
            .iter()
            .find(|p| p.display_name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> DomainResult<Option<Player>> {
        let mut tables = self.tables.lock().await;
        if let Some(name) = &changes.display_name {
            if tables.display_name_taken(name, Some(id)) {
                return Err(DomainError::conflict("Display name is already taken"));
            }
        }

        let Some(player) = tables.players.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.display_name {
            player.display_name = name;
        }
        if let Some(visible) = changes.is_visible {
            player.is_visible = visible;
        }
        player.updated_at = Utc::now();
        Ok(Some(player.clone()))
    }

    async fn set_moderator(&self, id: Uuid, is_moderator: bool) -> DomainResult<Option<Player>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.players.iter_mut().find(|p| p.id == id).map(|p| {
            p.is_moderator = is_moderator;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn insert(&self, new_match: NewMatch) -> DomainResult<Match> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let sports_match = Match {
            id: Uuid::new_v4(),
            moderator_id: new_match.moderator_id,
            match_type: new_match.match_type,
            title: new_match.title,
            location: new_match.location,
            scheduled_at: new_match.scheduled_at,
            status: MatchStatus::Open,
            price_cents: new_match.price_cents,
            payout_key: new_match.payout_key,
            check_in_ceiling: new_match.check_in_ceiling,
            created_at: now,
            updated_at: now,
        };
        tables.matches.push(sports_match.clone());
        Ok(sports_match)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Match>> {
        let tables = self.tables.lock().await;
        Ok(tables.match_by_id(id).cloned())
    }

    async fn set_status(&self, id: Uuid, status: MatchStatus) -> DomainResult<Option<Match>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.matches.iter_mut().find(|m| m.id == id).map(|m| {
            m.status = status;
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn update_details(
        &self,
        id: Uuid,
        changes: MatchChanges,
    ) -> DomainResult<Option<Match>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.matches.iter_mut().find(|m| m.id == id).map(|m| {
            changes.apply_to(m);
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn find_open_by_moderator(&self, moderator_id: Uuid) -> DomainResult<Option<Match>> {
        let tables = self.tables.lock().await;
        // Later inserts win: the vector is in creation order.
        Ok(tables
            .matches
            .iter()
            .rev()
            .find(|m| m.moderator_id == moderator_id && m.is_open())
            .cloned())
    }

    async fn list_by_status(&self, status: MatchStatus) -> DomainResult<Vec<Match>> {
        let tables = self.tables.lock().await;
        let mut matches: Vec<Match> = tables
            .matches
            .iter()
            .filter(|m| m.status == status)
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.scheduled_at);
        Ok(matches)
    }

    async fn list_by_moderator(&self, moderator_id: Uuid) -> DomainResult<Vec<Match>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .matches
            .iter()
            .filter(|m| m.moderator_id == moderator_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RegistrationStore for InMemoryStore {
    async fn insert(&self, registration: NewRegistration) -> DomainResult<Registration> {
        let mut tables = self.tables.lock().await;
        if tables
            .registrations
            .iter()
            .any(|r| r.match_id == registration.match_id && r.player_id == registration.player_id)
        {
            return Err(DomainError::conflict(
                "Player is already registered for this match",
            ));
        }
        if tables
            .registrations
            .iter()
            .any(|r| r.access_token == registration.access_token)
        {
            return Err(DomainError::conflict("Access token already issued"));
        }

        let now = Utc::now();
        let registration = Registration {
            id: Uuid::new_v4(),
            match_id: registration.match_id,
            player_id: registration.player_id,
            status: RegistrationStatus::Pending,
            payment_status: registration.payment_status,
            access_token: registration.access_token,
            check_in_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Registration>> {
        let tables = self.tables.lock().await;
        Ok(tables.registrations.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_match_and_player(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<Option<Registration>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .find(|r| r.match_id == match_id && r.player_id == player_id)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<Registration>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .find(|r| r.access_token == token)
            .cloned())
    }

    async fn token_exists(&self, token: &str) -> DomainResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.registrations.iter().any(|r| r.access_token == token))
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: RegistrationStatus,
        to: RegistrationStatus,
    ) -> DomainResult<Option<Registration>> {
        let mut tables = self.tables.lock().await;
        Ok(tables
            .registration_mut(id)
            .filter(|r| r.status == from)
            .map(|r| {
                r.status = to;
                r.updated_at = Utc::now();
                r.clone()
            }))
    }

    async fn confirm_payment(&self, id: Uuid) -> DomainResult<Option<Registration>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.registration_mut(id).map(|r| {
            r.payment_status = PaymentStatus::Paid;
            r.status = RegistrationStatus::Confirmed;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn try_check_in(&self, token: &str) -> DomainResult<CheckInOutcome> {
        let mut tables = self.tables.lock().await;
        let Some(index) = tables
            .registrations
            .iter()
            .position(|r| r.access_token == token)
        else {
            return Ok(CheckInOutcome::UnknownToken);
        };

        let match_id = tables.registrations[index].match_id;
        let check_in_ceiling = tables
            .match_by_id(match_id)
            .map(|m| m.check_in_ceiling)
            .ok_or_else(|| DomainError::Storage(format!("Match {} missing", match_id)))?;

        let registration = &mut tables.registrations[index];
        if registration.check_in_count >= check_in_ceiling {
            return Ok(CheckInOutcome::LimitReached {
                check_in_count: registration.check_in_count,
                check_in_ceiling,
            });
        }

        registration.check_in_count += 1;
        registration.updated_at = Utc::now();
        Ok(CheckInOutcome::Admitted {
            registration: registration.clone(),
            check_in_ceiling,
        })
    }

    async fn roster(&self, match_id: Uuid) -> DomainResult<Vec<RosterEntry>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.match_id == match_id)
            .filter_map(|r| {
                let player = tables.players.iter().find(|p| p.id == r.player_id)?;
                Some(RosterEntry {
                    registration_id: r.id,
                    player_id: player.id,
                    display_name: player.display_name.clone(),
                    email: player.email.clone(),
                    status: r.status,
                    payment_status: r.payment_status,
                    check_in_count: r.check_in_count,
                })
            })
            .collect())
    }

    async fn list_by_player(&self, player_id: Uuid) -> DomainResult<Vec<Registration>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.player_id == player_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InvitationStore for InMemoryStore {
    async fn insert(&self, invitation: NewInvitation) -> DomainResult<Invitation> {
        let mut tables = self.tables.lock().await;
        if tables.invitations.iter().any(|i| {
            i.status == InvitationStatus::Pending
                && i.sender_id == invitation.sender_id
                && i.recipient_id == invitation.recipient_id
                && i.match_id == invitation.match_id
        }) {
            return Err(DomainError::conflict(
                "A pending invitation already exists for this player",
            ));
        }

        let now = Utc::now();
        let invitation = Invitation {
            id: Uuid::new_v4(),
            sender_id: invitation.sender_id,
            recipient_id: invitation.recipient_id,
            match_id: invitation.match_id,
            status: InvitationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.invitations.push(invitation.clone());
        Ok(invitation)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Invitation>> {
        let tables = self.tables.lock().await;
        Ok(tables.invitations.iter().find(|i| i.id == id).cloned())
    }

    async fn pending_exists(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        match_id: Uuid,
    ) -> DomainResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.invitations.iter().any(|i| {
            i.status == InvitationStatus::Pending
                && i.sender_id == sender_id
                && i.recipient_id == recipient_id
                && i.match_id == match_id
        }))
    }

    async fn resolve(
        &self,
        id: Uuid,
        status: InvitationStatus,
    ) -> DomainResult<Option<Invitation>> {
        let mut tables = self.tables.lock().await;
        Ok(tables
            .invitations
            .iter_mut()
            .find(|i| i.id == id && i.status == InvitationStatus::Pending)
            .map(|i| {
                i.status = status;
                i.updated_at = Utc::now();
                i.clone()
            }))
    }

    async fn list_received(&self, recipient_id: Uuid) -> DomainResult<Vec<Invitation>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .invitations
            .iter()
            .filter(|i| i.recipient_id == recipient_id)
            .cloned()
            .collect())
    }

    async fn list_sent(&self, sender_id: Uuid) -> DomainResult<Vec<Invitation>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .invitations
            .iter()
            .filter(|i| i.sender_id == sender_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FriendRequestStore for InMemoryStore {
    async fn insert(&self, request: NewFriendRequest) -> DomainResult<FriendRequest> {
        let mut tables = self.tables.lock().await;
        if tables
            .friend_requests
            .iter()
            .any(|f| f.links(request.requester_id, request.recipient_id))
        {
            return Err(DomainError::conflict(
                "A relation already exists between these players",
            ));
        }

        let now = Utc::now();
        let relation = FriendRequest {
            id: Uuid::new_v4(),
            requester_id: request.requester_id,
            recipient_id: request.recipient_id,
            status: FriendRequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.friend_requests.push(relation.clone());
        Ok(relation)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<FriendRequest>> {
        let tables = self.tables.lock().await;
        Ok(tables.friend_requests.iter().find(|f| f.id == id).cloned())
    }

    async fn find_between(&self, a: Uuid, b: Uuid) -> DomainResult<Option<FriendRequest>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .friend_requests
            .iter()
            .find(|f| f.links(a, b))
            .cloned())
    }

    async fn accept(&self, id: Uuid) -> DomainResult<Option<FriendRequest>> {
        let mut tables = self.tables.lock().await;
        Ok(tables
            .friend_requests
            .iter_mut()
            .find(|f| f.id == id)
            .map(|f| {
                f.status = FriendRequestStatus::Accepted;
                f.updated_at = Utc::now();
                f.clone()
            }))
    }

    async fn list_for_player(&self, player_id: Uuid) -> DomainResult<Vec<FriendRequest>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .friend_requests
            .iter()
            .filter(|f| f.involves(player_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RatingStore for InMemoryStore {
    async fn insert(&self, rating: NewRating) -> DomainResult<Rating> {
        let mut tables = self.tables.lock().await;
        if tables
            .ratings
            .iter()
            .any(|r| r.match_id == rating.match_id && r.player_id == rating.player_id)
        {
            return Err(DomainError::conflict("Match already rated by this player"));
        }

        let rating = Rating {
            id: Uuid::new_v4(),
            match_id: rating.match_id,
            player_id: rating.player_id,
            score: rating.score,
            comment: rating.comment,
            created_at: Utc::now(),
        };
        tables.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn list_by_match(&self, match_id: Uuid) -> DomainResult<Vec<Rating>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .ratings
            .iter()
            .filter(|r| r.match_id == match_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn insert(&self, message: NewMessage) -> DomainResult<Message> {
        let mut tables = self.tables.lock().await;
        let message = Message {
            id: Uuid::new_v4(),
            sender_id: message.sender_id,
            recipient_id: message.recipient_id,
            body: message.body,
            sent_at: Utc::now(),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn conversation(&self, a: Uuid, b: Uuid) -> DomainResult<Vec<Message>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == a && m.recipient_id == b)
                    || (m.sender_id == b && m.recipient_id == a)
            })
            .cloned()
            .collect())
    }
}
