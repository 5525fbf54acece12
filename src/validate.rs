//! Form validation applied before a user is created.
//!
//! Checks run in a fixed order and stop at the first failure. Updates are not
//! validated: an edit can persist values these checks would reject.
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub const MAX_NAME_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 25;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("name pattern compiles"));

/// First rule a pending form violates. `Display` is the message shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Both name and email are required.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid name (letters and spaces only)")]
    InvalidName,
    #[error("Name cannot be longer than 20 characters")]
    NameTooLong,
    #[error("Email cannot be longer than 25 characters")]
    EmailTooLong,
}

/// Validate a new user's fields.
///
/// Emptiness is judged on the trimmed values; patterns and lengths apply to
/// the input as typed. Lengths are counted in UTF-16 code units, so a
/// character outside the Basic Multilingual Plane counts twice.
pub fn validate_new_user(name: &str, email: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !NAME_RE.is_match(name) {
        return Err(ValidationError::InvalidName);
    }
    if name.encode_utf16().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }
    if email.encode_utf16().count() > MAX_EMAIL_LEN {
        return Err(ValidationError::EmailTooLong);
    }
    Ok(())
}
