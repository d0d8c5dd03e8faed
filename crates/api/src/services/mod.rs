//! Services that live at the HTTP boundary.

pub mod auth;
pub mod roster_export;

pub use auth::AuthService;
