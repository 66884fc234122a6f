//! Error types for session and directory lookups.

use thiserror::Error;

/// Result type alias for identity collaborator operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failures surfaced by the identity collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The identity provider could not be reached or answered badly.
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The directory lookup failed.
    #[error("user directory unavailable: {0}")]
    DirectoryUnavailable(String),
}
