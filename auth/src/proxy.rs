//! Session facts derived from auth-proxy identity headers.
//!
//! Deployments run the service behind an authenticating proxy that
//! holds the actual session with the third-party identity provider and
//! forwards the verified identity in request headers. An absent email
//! header means the caller is anonymous.

use crate::error::Result;
use crate::provider::{AuthUser, SessionProvider};
use async_trait::async_trait;

/// Header carrying the verified user email.
pub const AUTH_EMAIL_HEADER: &str = "x-auth-request-email";

/// Header carrying the comma-separated granted groups.
pub const AUTH_GROUPS_HEADER: &str = "x-auth-request-groups";

/// Session backed by forwarded identity headers.
#[derive(Debug, Clone, Default)]
pub struct ProxyHeaderSession {
    email: Option<String>,
    groups: Vec<String>,
}

impl ProxyHeaderSession {
    /// Build a session from the raw header values.
    #[must_use]
    pub fn from_headers(email: Option<&str>, groups: Option<&str>) -> Self {
        let email = email
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string);
        let groups = groups
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|group| !group.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { email, groups }
    }

    /// An anonymous session (no identity forwarded).
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            email: None,
            groups: Vec::new(),
        }
    }
}

#[async_trait]
impl SessionProvider for ProxyHeaderSession {
    async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.email.is_some())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        Ok(self.email.clone().map(|email| AuthUser { email }))
    }

    async fn has_permission(&self, name: &str) -> Result<bool> {
        Ok(self.email.is_some() && self.groups.iter().any(|group| group == name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::provider::MANAGER_PERMISSION;

    #[tokio::test]
    async fn missing_email_means_anonymous() {
        let session = ProxyHeaderSession::from_headers(None, Some("manager"));
        assert!(!session.is_authenticated().await.unwrap());
        assert!(session.current_user().await.unwrap().is_none());
        assert!(!session.has_permission(MANAGER_PERMISSION).await.unwrap());
    }

    #[tokio::test]
    async fn groups_are_split_and_trimmed() {
        let session = ProxyHeaderSession::from_headers(
            Some("boss@example.com"),
            Some(" manager , staff ,"),
        );
        assert!(session.is_authenticated().await.unwrap());
        assert!(session.has_permission("manager").await.unwrap());
        assert!(session.has_permission("staff").await.unwrap());
        assert!(!session.has_permission("admin").await.unwrap());
        let user = session.current_user().await.unwrap().unwrap();
        assert_eq!(user.email, "boss@example.com");
    }

    #[tokio::test]
    async fn blank_email_header_is_anonymous() {
        let session = ProxyHeaderSession::from_headers(Some("  "), None);
        assert!(!session.is_authenticated().await.unwrap());
    }
}
