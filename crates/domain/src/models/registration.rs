//! Registration domain models.
//!
//! A registration is a player's claim on a seat in a match. It carries its own
//! review status, payment status, door access token and check-in counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Review status of a registration.
///
/// `Pending -> Accepted | Declined`, `Accepted -> Confirmed` once payment is
/// attested. `Declined` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Accepted,
    Declined,
    Confirmed,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Accepted => "accepted",
            RegistrationStatus::Declined => "declined",
            RegistrationStatus::Confirmed => "confirmed",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RegistrationStatus::Pending),
            "accepted" => Ok(RegistrationStatus::Accepted),
            "declined" => Ok(RegistrationStatus::Declined),
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            _ => Err(format!("Invalid registration status: {}", s)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Awaiting,
    Paid,
    Free,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Awaiting => "awaiting",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Free => "free",
        }
    }

    /// Initial payment status for a match with the given price.
    pub fn for_price(price_cents: i64) -> Self {
        if price_cents == 0 {
            PaymentStatus::Free
        } else {
            PaymentStatus::Awaiting
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A player's registration for a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Registration {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub status: RegistrationStatus,
    pub payment_status: PaymentStatus,
    /// Opaque door credential, immutable after creation.
    pub access_token: String,
    pub check_in_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to persist a new registration. Always created Pending.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub payment_status: PaymentStatus,
    pub access_token: String,
}

/// One line of a match roster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterEntry {
    pub registration_id: Uuid,
    pub player_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub status: RegistrationStatus,
    pub payment_status: PaymentStatus,
    pub check_in_count: i32,
}

/// Response for a match roster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterResponse {
    pub match_id: Uuid,
    pub data: Vec<RosterEntry>,
}

/// Response for listing a player's own registrations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListRegistrationsResponse {
    pub data: Vec<Registration>,
}

/// Result of the atomic check-in attempt performed by a store.
#[derive(Debug, Clone)]
pub enum CheckInOutcome {
    /// The counter was incremented; holds the updated registration.
    Admitted {
        registration: Registration,
        check_in_ceiling: i32,
    },
    /// The counter already reached the match's ceiling; nothing changed.
    LimitReached {
        check_in_count: i32,
        check_in_ceiling: i32,
    },
    /// No registration holds the token.
    UnknownToken,
}

/// Request payload for a door scan.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CheckInRequest {
    #[validate(length(min = 1, max = 128, message = "Access token must be between 1 and 128 characters"))]
    pub token: String,
}

/// Result of a successful door scan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckInReceipt {
    pub registration_id: Uuid,
    pub match_id: Uuid,
    pub player_name: String,
    pub check_in_count: i32,
    pub check_in_ceiling: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_status_roundtrip() {
        for status in [
            RegistrationStatus::Pending,
            RegistrationStatus::Accepted,
            RegistrationStatus::Declined,
            RegistrationStatus::Confirmed,
        ] {
            assert_eq!(status.as_str().parse::<RegistrationStatus>().unwrap(), status);
        }
        assert!("waitlisted".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn test_payment_status_for_price() {
        assert_eq!(PaymentStatus::for_price(0), PaymentStatus::Free);
        assert_eq!(PaymentStatus::for_price(2000), PaymentStatus::Awaiting);
    }

    #[test]
    fn test_payment_status_serde() {
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"paid\"");
        assert_eq!(PaymentStatus::Awaiting.to_string(), "awaiting");
    }

    #[test]
    fn test_check_in_request_validation() {
        assert!(CheckInRequest { token: "abc".to_string() }.validate().is_ok());
        assert!(CheckInRequest { token: String::new() }.validate().is_err());
        assert!(CheckInRequest { token: "x".repeat(129) }.validate().is_err());
    }
}
