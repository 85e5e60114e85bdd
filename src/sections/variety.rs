//! Character variety sections - uppercase, lowercase and digits.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;

/// Checks for at least one uppercase letter.
pub fn uppercase_section(password: &SecretString) -> SectionResult {
    if !password.expose_secret().chars().any(|c| c.is_uppercase()) {
        return Some("Add an uppercase letter".to_string());
    }
    None
}

/// Checks for at least one lowercase letter.
pub fn lowercase_section(password: &SecretString) -> SectionResult {
    if !password.expose_secret().chars().any(|c| c.is_lowercase()) {
        return Some("Add a lowercase letter".to_string());
    }
    None
}

/// Checks for at least one ASCII digit.
pub fn digit_section(password: &SecretString) -> SectionResult {
    if !password.expose_secret().chars().any(|c| c.is_ascii_digit()) {
        return Some("Add a number".to_string());
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
    fn test_uppercase_section_missing() {
        let result = uppercase_section(&secret("lowercase123!"));
        assert!(matches!(result, Some(ref hint) if hint.contains("uppercase")));
    }

    #[test]
    fn test_lowercase_section_missing() {
        let result = lowercase_section(&secret("UPPERCASE123!"));
        assert!(matches!(result, Some(ref hint) if hint.contains("lowercase")));
    }

    #[test]
    fn test_digit_section_missing() {
        let result = digit_section(&secret("NoNumbers!"));
        assert!(matches!(result, Some(ref hint) if hint.contains("number")));
    }

    #[test]
    fn test_variety_sections_all_present() {
        let pwd = secret("HasAll123!@#");
        assert_eq!(uppercase_section(&pwd), None);
        assert_eq!(lowercase_section(&pwd), None);
        assert_eq!(digit_section(&pwd), None);
    }

    #[test]
    fn test_digit_section_ignores_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII
        assert!(digit_section(&secret("Password\u{0663}")).is_some());
    }
}
