//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Leading `+`, digits only, at least 10 characters in total, E.164 upper bound
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+\d{9,15}$").expect("valid E.164 pattern")
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check that a phone number is E.164-like: leading `+`, digits only,
/// length of at least 10 characters.
///
/// The check runs on the raw input; callers that accept formatted numbers
/// normalize first.
pub fn is_valid_phone(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for logs (e.g., +14****0100)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+1 (415) 555-0100"), "+14155550100");
        assert_eq!(normalize_phone_number("+44 20 7183 8750"), "+442071838750");
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+15551230000"));
        assert!(is_valid_phone("+919876543210"));
        assert!(is_valid_phone("+123456789"));
        assert!(!is_valid_phone("15551230000")); // missing +
        assert!(!is_valid_phone("+12345678")); // too short
        assert!(!is_valid_phone("+1555123000a"));
        assert!(!is_valid_phone("+1 555 123 0000"));
        assert!(!is_valid_phone("+1234567890123456")); // too long
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+15551230000"), "+15****0000");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
