//! Collaborator traits for sessions and the user directory.
//!
//! Both traits are dyn-compatible (`async_trait`) so the web layer can
//! carry them behind `Arc<dyn _>` per request and share one directory
//! handle across handlers.

use crate::error::Result;
use async_trait::async_trait;

/// Capability gating manager-only affordances: the customer `active`
/// flag and technician assignment.
pub const MANAGER_PERMISSION: &str = "manager";

/// An authenticated user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Email identity reported by the provider.
    pub email: String,
}

/// Request-scoped session facts from the identity provider.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Whether the caller holds a valid session.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot be consulted.
    async fn is_authenticated(&self) -> Result<bool>;

    /// The authenticated user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot be consulted.
    async fn current_user(&self) -> Result<Option<AuthUser>>;

    /// Whether the provider granted the named permission.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot be consulted.
    async fn has_permission(&self, name: &str) -> Result<bool>;
}

/// Role-based user listing, consumed only to populate the manager's
/// technician picker.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Email identities of users holding the technician role.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be consulted.
    async fn technician_emails(&self) -> Result<Vec<String>>;
}
