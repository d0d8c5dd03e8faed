//! Domain layer for the Matchday backend.
//!
//! This crate contains:
//! - Domain models (Player, Match, Registration, Invitation, FriendRequest, Rating)
//! - Store traits the persistence layer implements, plus an in-memory store
//! - The registration and access-control services
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::{DomainError, DomainResult};
