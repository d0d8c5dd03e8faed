//! Domain error taxonomy.

use std::fmt::Display;
use thiserror::Error;

/// Failures surfaced by domain services.
///
/// `NotFound`, `Conflict`, `NotAllowed`, `CheckInLimitReached` and `Validation`
/// are caller-recoverable and reach the boundary verbatim. `Storage` wraps a broken dependency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The referenced entity does not exist, or is hidden for privacy.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate creation of a registration, invitation, relation or rating.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The entities exist but a precondition of the operation is violated.
    #[error("Not allowed: {0}")]
    NotAllowed(String),

    /// The access token has been used as many times as the match allows.
    #[error("Check-in limit reached ({check_in_count}/{check_in_ceiling})")]
    CheckInLimitReached {
        check_in_count: i32,
        check_in_ceiling: i32,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        DomainError::NotFound(format!("{} {} not found", entity, id))
    }

    pub fn not_allowed(message: impl Into<String>) -> Self {
        DomainError::NotAllowed(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        DomainError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 1, message = "ceiling must be at least 1"))]
        ceiling: i32,
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Match", "abc");
        assert_eq!(err.to_string(), "Not found: Match abc not found");
    }

    #[test]
    fn test_check_in_limit_message() {
        let err = DomainError::CheckInLimitReached {
            check_in_count: 2,
            check_in_ceiling: 2,
        };
        assert_eq!(err.to_string(), "Check-in limit reached (2/2)");
    }

    #[test]
    fn test_from_validation_errors() {
        let err: DomainError = Probe { ceiling: 0 }.validate().unwrap_err().into();
        assert_eq!(
            err,
            DomainError::Validation("ceiling must be at least 1".to_string())
        );
    }
}
