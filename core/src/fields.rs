//! Field-keyed validation error maps.

use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping from field name to a single human-readable violation
/// message.
///
/// The first violation recorded for a field wins; later violations on
/// an already-flagged field are discarded. Field names use the wire
/// (camelCase) spelling so the presentation layer can attach messages
/// to form inputs directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Create an empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a violation for `field` unless one is already present.
    pub fn push(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record a violation for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.push(field, message);
        }
    }

    /// Whether any violation has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of flagged fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn first_violation_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.push("email", "Invalid email");
        errors.push("email", "email is required");
        assert_eq!(errors.get("email"), Some("Invalid email"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn check_records_only_failures() {
        let mut errors = FieldErrors::new();
        errors.check(true, "city", "City is required");
        errors.check(false, "state", "Use state abbreviation");
        assert!(errors.get("city").is_none());
        assert_eq!(errors.get("state"), Some("Use state abbreviation"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.push("zip", "Invalid ZIP format");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"zip": "Invalid ZIP format"}));
    }
}
