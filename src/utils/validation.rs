//! Boundary validation helpers

use crate::utils::error::{Result, ServiceError};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Check if a string is a valid email
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(ServiceError::Validation(format!(
            "Invalid email format: {}",
            email
        )));
    }
    Ok(())
}
