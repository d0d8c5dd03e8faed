//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod friend_request;
pub mod invitation;
pub mod message;
pub mod player;
pub mod rating;
pub mod registration;
pub mod sports_match;

pub use friend_request::{FriendRequestEntity, FriendRequestStatusDb};
pub use invitation::{InvitationEntity, InvitationStatusDb};
pub use message::MessageEntity;
pub use player::PlayerEntity;
pub use rating::RatingEntity;
pub use registration::{
    CheckInStateEntity, CheckedInEntity, PaymentStatusDb, RegistrationEntity,
    RegistrationStatusDb, RosterEntryEntity,
};
pub use sports_match::{MatchEntity, MatchStatusDb};
