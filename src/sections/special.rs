//! Special character section.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;

/// Punctuation accepted for the special-character criterion.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Checks for at least one character from [`SPECIAL_CHARS`].
///
/// Other punctuation (`-`, `_`, `~`, spaces...) does not count.
pub fn special_section(password: &SecretString) -> SectionResult {
    if !password.expose_secret().chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Some("Add a special character (e.g. ! @ # $)".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_special_section_present() {
        for pwd in ["a!", "x@y", "quote\"", "brace{", "pipe|", "angle<"] {
            assert_eq!(special_section(&secret(pwd)), None, "{pwd}");
        }
    }

    #[test]
    fn test_special_section_outside_fixed_set() {
        for pwd in ["under_score", "dash-dash", "tilde~", "with space", "semi;colon"] {
            assert!(special_section(&secret(pwd)).is_some(), "{pwd}");
        }
    }
}
