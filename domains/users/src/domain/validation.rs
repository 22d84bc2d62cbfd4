//! Validation helpers and constants for account handlers

use regex::Regex;

lazy_static::lazy_static! {
    /// Username validation regex
    /// Letters, digits, underscores, dots and hyphens; 3 to 32 characters
    pub static ref USERNAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").unwrap();
}

/// Validate a username according to the rules
pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}
