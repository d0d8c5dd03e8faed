//! Persistence layer for the Matchday backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations of the domain store traits

pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod repositories;

use domain::store::Stores;
use sqlx::PgPool;
use std::sync::Arc;

use repositories::{
    FriendRequestRepository, InvitationRepository, MatchRepository, MessageRepository,
    PlayerRepository, RatingRepository, RegistrationRepository,
};

/// Store handles backed by PostgreSQL.
pub fn postgres_stores(pool: PgPool) -> Stores {
    Stores {
        players: Arc::new(PlayerRepository::new(pool.clone())),
        matches: Arc::new(MatchRepository::new(pool.clone())),
        registrations: Arc::new(RegistrationRepository::new(pool.clone())),
        invitations: Arc::new(InvitationRepository::new(pool.clone())),
        friend_requests: Arc::new(FriendRequestRepository::new(pool.clone())),
        ratings: Arc::new(RatingRepository::new(pool.clone())),
        messages: Arc::new(MessageRepository::new(pool)),
    }
}
