//! Domain models for Matchday.

pub mod certificate;
pub mod friend_request;
pub mod invitation;
pub mod message;
pub mod player;
pub mod rating;
pub mod registration;
pub mod sports_match;

pub use certificate::{is_certificate_eligible, Certificate, EligibilityResponse};
pub use friend_request::{
    FriendRequest, FriendRequestStatus, ListFriendRequestsResponse, NewFriendRequest,
    SendFriendRequest,
};
pub use invitation::{
    CreateInvitationRequest, Invitation, InvitationAcceptance, InvitationStatus,
    ListInvitationsResponse, NewInvitation,
};
pub use message::{ConversationResponse, Message, NewMessage, SendMessageRequest};
pub use player::{
    AuthResponse, LoginRequest, NewPlayer, Player, PlayerSummary, ProfileChanges, SignUpRequest,
    UpdateProfileRequest,
};
pub use rating::{NewRating, RateMatchRequest, Rating, RatingSummary};
pub use registration::{
    CheckInOutcome, CheckInReceipt, CheckInRequest, ListRegistrationsResponse, NewRegistration,
    PaymentStatus, Registration, RegistrationStatus, RosterEntry, RosterResponse,
};
pub use sports_match::{
    ListMatchesResponse, Match, MatchChanges, MatchStatus, NewMatch, OpenMatchRequest,
    SetMatchStatusRequest, UpdateMatchRequest,
};
