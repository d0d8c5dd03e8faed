//! Domain services for Matchday.
//!
//! Services hold store handles and implement the registration and access
//! control lifecycle on top of them. They are constructed explicitly by the
//! composition root.

pub mod access_control;
pub mod certificate;
pub mod invitation;
pub mod match_lifecycle;
pub mod player;
pub mod rating;
pub mod registration;
pub mod social;

#[cfg(test)]
pub(crate) mod fixtures;

pub use access_control::{AccessControlGate, AccessTokenIssuer};
pub use certificate::CertificateService;
pub use invitation::InvitationService;
pub use match_lifecycle::MatchService;
pub use player::PlayerService;
pub use rating::RatingService;
pub use registration::RegistrationService;
pub use social::SocialGraph;
