//! Storage ports for the domain services.
//!
//! Every method is a single keyed operation. Uniqueness invariants are the
//! store's job: an insert that would duplicate a (match, player) registration,
//! a pending (sender, recipient, match) invitation, a player pair relation or
//! a (match, player) rating fails with [`crate::DomainError::Conflict`]
//! atomically with the insert.

pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::DomainResult;
use crate::models::{
    CheckInOutcome, FriendRequest, Invitation, InvitationStatus, Match, MatchChanges,
    MatchStatus, Message, NewFriendRequest, NewInvitation, NewMatch, NewMessage, NewPlayer,
    NewRating, NewRegistration, Player, ProfileChanges, Rating, Registration,
    RegistrationStatus, RosterEntry,
};

pub use memory::InMemoryStore;

#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Fails with `Conflict` when the email or display name is taken.
    async fn insert(&self, player: NewPlayer) -> DomainResult<Player>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Player>>;

    /// Lookup by normalized (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Player>>;

    /// Case-insensitive lookup by display name.
    async fn find_by_display_name(&self, name: &str) -> DomainResult<Option<Player>>;

    /// Fails with `Conflict` when the new display name is taken.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> DomainResult<Option<Player>>;

    async fn set_moderator(&self, id: Uuid, is_moderator: bool) -> DomainResult<Option<Player>>;
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn insert(&self, new_match: NewMatch) -> DomainResult<Match>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Match>>;

    async fn set_status(&self, id: Uuid, status: MatchStatus) -> DomainResult<Option<Match>>;

    async fn update_details(&self, id: Uuid, changes: MatchChanges)
        -> DomainResult<Option<Match>>;

    /// The moderator's most recently created open match.
    async fn find_open_by_moderator(&self, moderator_id: Uuid) -> DomainResult<Option<Match>>;

    /// Matches in the given status, soonest first.
    async fn list_by_status(&self, status: MatchStatus) -> DomainResult<Vec<Match>>;

    async fn list_by_moderator(&self, moderator_id: Uuid) -> DomainResult<Vec<Match>>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Fails with `Conflict` when the (match, player) pair or the access token
    /// already exists.
    async fn insert(&self, registration: NewRegistration) -> DomainResult<Registration>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Registration>>;

    async fn find_by_match_and_player(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> DomainResult<Option<Registration>>;

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<Registration>>;

    async fn token_exists(&self, token: &str) -> DomainResult<bool>;

    /// Moves the registration from `from` to `to`. Returns `None` when the
    /// registration does not exist or is no longer in `from`.
    async fn transition_status(
        &self,
        id: Uuid,
        from: RegistrationStatus,
        to: RegistrationStatus,
    ) -> DomainResult<Option<Registration>>;

    /// Sets payment Paid and status Confirmed unconditionally.
    async fn confirm_payment(&self, id: Uuid) -> DomainResult<Option<Registration>>;

    /// Increments the check-in counter of the registration holding `token`
    /// if and only if it is below the match's ceiling, as one atomic step.
    async fn try_check_in(&self, token: &str) -> DomainResult<CheckInOutcome>;

    /// Registrations of a match joined with player name and email, oldest
    /// first.
    async fn roster(&self, match_id: Uuid) -> DomainResult<Vec<RosterEntry>>;

    async fn list_by_player(&self, player_id: Uuid) -> DomainResult<Vec<Registration>>;
}

#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Fails with `Conflict` when a pending invitation exists for the same
    /// (sender, recipient, match).
    async fn insert(&self, invitation: NewInvitation) -> DomainResult<Invitation>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Invitation>>;

    async fn pending_exists(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        match_id: Uuid,
    ) -> DomainResult<bool>;

    /// Resolves a pending invitation. Returns `None` when it does not exist
    /// or is no longer pending.
    async fn resolve(&self, id: Uuid, status: InvitationStatus)
        -> DomainResult<Option<Invitation>>;

    async fn list_received(&self, recipient_id: Uuid) -> DomainResult<Vec<Invitation>>;

    async fn list_sent(&self, sender_id: Uuid) -> DomainResult<Vec<Invitation>>;
}

#[async_trait]
pub trait FriendRequestStore: Send + Sync {
    /// Fails with `Conflict` when any relation links the two players.
    async fn insert(&self, request: NewFriendRequest) -> DomainResult<FriendRequest>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<FriendRequest>>;

    /// The relation between `a` and `b` in either direction.
    async fn find_between(&self, a: Uuid, b: Uuid) -> DomainResult<Option<FriendRequest>>;

    async fn accept(&self, id: Uuid) -> DomainResult<Option<FriendRequest>>;

    async fn list_for_player(&self, player_id: Uuid) -> DomainResult<Vec<FriendRequest>>;
}

#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Fails with `Conflict` when the player already rated the match.
    async fn insert(&self, rating: NewRating) -> DomainResult<Rating>;

    async fn list_by_match(&self, match_id: Uuid) -> DomainResult<Vec<Rating>>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, message: NewMessage) -> DomainResult<Message>;

    /// Messages exchanged between `a` and `b`, oldest first.
    async fn conversation(&self, a: Uuid, b: Uuid) -> DomainResult<Vec<Message>>;
}

/// Store handles the composition root hands to the services.
#[derive(Clone)]
pub struct Stores {
    pub players: Arc<dyn PlayerStore>,
    pub matches: Arc<dyn MatchStore>,
    pub registrations: Arc<dyn RegistrationStore>,
    pub invitations: Arc<dyn InvitationStore>,
    pub friend_requests: Arc<dyn FriendRequestStore>,
    pub ratings: Arc<dyn RatingStore>,
    pub messages: Arc<dyn MessageStore>,
}

impl Stores {
    /// All stores backed by one shared in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            players: store.clone(),
            matches: store.clone(),
            registrations: store.clone(),
            invitations: store.clone(),
            friend_requests: store.clone(),
            ratings: store.clone(),
            messages: store,
        }
    }
}
