//! Field format checks shared by the validation schemas.
//!
//! Phone and ZIP formats are fixed string patterns, not configurable.
//! The email check is structural only: no DNS lookups, no
//! deliverability guarantees.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)] // fixed pattern, exercised by tests
static PHONE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("phone pattern"));

#[allow(clippy::expect_used)] // fixed pattern, exercised by tests
static ZIP_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern"));

/// Whether `value` looks like an email address.
///
/// Requires a single `@`, a non-empty local part, and a dotted domain,
/// with a conservative ASCII character set on both sides.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.len() < 3 || value.len() > 254 {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '_'))
    {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Whether `value` matches the `XXX-XXX-XXXX` phone format.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_FORMAT.is_match(value)
}

/// Whether `value` is a 5-digit or 5+4 ZIP code.
#[must_use]
pub fn is_valid_zip(value: &str) -> bool {
    ZIP_FORMAT.is_match(value)
}

/// Whether `value` is a two-letter state abbreviation.
#[must_use]
pub fn is_state_abbreviation(value: &str) -> bool {
    value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic())
}

/// Trim an optional free-text field, coercing empty input to `None`.
#[must_use]
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name+tag@sub.example.co"));
        assert!(is_valid_email("new-ticket@example.com"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_requires_dashed_groups() {
        assert!(is_valid_phone("555-123-4567"));
        assert!(!is_valid_phone("5551234567"));
        assert!(!is_valid_phone("555-123-456"));
        assert!(!is_valid_phone("55-1234-5678"));
        assert!(!is_valid_phone("555-123-45678"));
    }

    #[test]
    fn zip_allows_plus_four() {
        assert!(is_valid_zip("12345"));
        assert!(is_valid_zip("12345-6789"));
        assert!(!is_valid_zip("1234"));
        assert!(!is_valid_zip("123456"));
        assert!(!is_valid_zip("12345-678"));
    }

    #[test]
    fn state_is_exactly_two_letters() {
        assert!(is_state_abbreviation("CA"));
        assert!(is_state_abbreviation("ny"));
        assert!(!is_state_abbreviation("C"));
        assert!(!is_state_abbreviation("CAL"));
        assert!(!is_state_abbreviation("C1"));
    }

    #[test]
    fn normalize_trims_and_drops_empty() {
        assert_eq!(normalize_optional(Some("  note  ")), Some("note".to_string()));
        assert_eq!(normalize_optional(Some("   ")), None);
        assert_eq!(normalize_optional(Some("")), None);
        assert_eq!(normalize_optional(None), None);
    }
}
