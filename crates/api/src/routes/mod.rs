//! HTTP route handlers.

pub mod auth;
pub mod check_ins;
pub mod friends;
pub mod health;
pub mod invitations;
pub mod matches;
pub mod messages;
pub mod players;
pub mod ratings;
pub mod registrations;
