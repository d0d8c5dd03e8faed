//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a player display name.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;

lazy_static::lazy_static! {
    static ref DISPLAY_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} ._'-]*$").unwrap();
}

/// Validates a player display name.
///
/// Names address invitations, so they must start with a letter or digit and
/// may only contain letters, digits, spaces and `. _ ' -`.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        let mut err = ValidationError::new("display_name_length");
        err.message = Some("Display name must be between 1 and 50 characters".into());
        return Err(err);
    }
    if !DISPLAY_NAME_REGEX.is_match(trimmed) {
        let mut err = ValidationError::new("display_name_format");
        err.message = Some("Display name contains invalid characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a free-text field is not only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Normalizes an e-mail address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizes a display name for storage and lookup.
pub fn normalize_display_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
