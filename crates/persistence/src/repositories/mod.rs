//! Repository implementations of the domain store traits.

pub mod friend_request;
pub mod invitation;
pub mod message;
pub mod player;
pub mod rating;
pub mod registration;
pub mod sports_match;

pub use friend_request::FriendRequestRepository;
pub use invitation::InvitationRepository;
pub use message::MessageRepository;
pub use player::PlayerRepository;
pub use rating::RatingRepository;
pub use registration::RegistrationRepository;
pub use sports_match::MatchRepository;
