//! Structured results returned by the mutation actions.

use crate::fields::FieldErrors;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a mutation action, shaped for direct presentation.
///
/// The status mirrors HTTP semantics (200, 201, 400, 500); `error`
/// carries per-field messages on validation or uniqueness failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    /// HTTP-style status code.
    pub status: u16,
    /// Human-readable outcome message.
    pub message: String,
    /// Field-keyed errors, when the failure is user-correctable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BTreeMap<String, String>>,
}

impl ActionResult {
    /// A 200 success.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            message: message.into(),
            error: None,
        }
    }

    /// A 201 created success.
    #[must_use]
    pub fn created(message: impl Into<String>) -> Self {
        Self {
            status: 201,
            message: message.into(),
            error: None,
        }
    }

    /// A 400 validation failure carrying the field error map.
    #[must_use]
    pub fn validation_failed(errors: FieldErrors) -> Self {
        Self {
            status: 400,
            message: "Validation failed".to_string(),
            error: Some(errors.into_map()),
        }
    }

    /// A 400 uniqueness conflict naming every conflicting field.
    #[must_use]
    pub fn unique_conflict(fields: &[String]) -> Self {
        let error = fields
            .iter()
            .map(|field| (field.clone(), format!("{field} is already in use.")))
            .collect();
        Self {
            status: 400,
            message: "Some fields must be unique.".to_string(),
            error: Some(error),
        }
    }

    /// A 500 failure with a generic message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
            error: None,
        }
    }

    /// Whether this result is a success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status < 300
    }
}
