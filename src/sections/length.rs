//! Length section - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;

/// Minimum number of characters for the length criterion.
pub const MIN_LENGTH: usize = 8;

/// Checks if the password meets the minimum length.
///
/// Length is counted in characters, not bytes.
///
/// # Returns
/// - `Some(hint)` if password is too short
/// - `None` if password has sufficient length
pub fn length_section(password: &SecretString) -> SectionResult {
    if password.expose_secret().chars().count() < MIN_LENGTH {
        return Some(format!("Use at least {} characters", MIN_LENGTH));
    }
    None
}
