//! Mock identity collaborators for tests.

use crate::error::{AuthError, Result};
use crate::provider::{AuthUser, SessionProvider, UserDirectory};
use async_trait::async_trait;
use std::collections::HashSet;

/// Mock session provider with scripted answers.
#[derive(Debug, Clone, Default)]
pub struct MockSessionProvider {
    authenticated: bool,
    email: Option<String>,
    permissions: HashSet<String>,
    unreachable: bool,
}

impl MockSessionProvider {
    /// A session with no authenticated caller.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session authenticated as `email`.
    #[must_use]
    pub fn authenticated(email: &str) -> Self {
        Self {
            authenticated: true,
            email: Some(email.to_string()),
            ..Self::default()
        }
    }

    /// Grant the named permission.
    #[must_use]
    pub fn with_permission(mut self, name: &str) -> Self {
        self.permissions.insert(name.to_string());
        self
    }

    /// A provider whose every lookup fails, as when the identity
    /// provider is unreachable.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    fn guard(&self) -> Result<()> {
        if self.unreachable {
            return Err(AuthError::ProviderUnavailable("mock outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn is_authenticated(&self) -> Result<bool> {
        self.guard()?;
        Ok(self.authenticated)
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        self.guard()?;
        Ok(self.email.clone().map(|email| AuthUser { email }))
    }

    async fn has_permission(&self, name: &str) -> Result<bool> {
        self.guard()?;
        Ok(self.permissions.contains(name))
    }
}

/// Mock directory returning a fixed technician list.
#[derive(Debug, Clone, Default)]
pub struct MockDirectory {
    emails: Vec<String>,
}

impl MockDirectory {
    /// Create a directory with the given technician emails.
    #[must_use]
    pub fn new(emails: Vec<String>) -> Self {
        Self { emails }
    }
}

#[async_trait]
impl UserDirectory for MockDirectory {
    async fn technician_emails(&self) -> Result<Vec<String>> {
        Ok(self.emails.clone())
    }
}
