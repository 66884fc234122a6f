//! Configuration-backed technician directory.

use crate::error::Result;
use crate::provider::UserDirectory;
use async_trait::async_trait;

/// Technician directory sourced from service configuration.
///
/// Stands in for the identity provider's role-based user listing; the
/// set of technicians changes rarely enough that a configured list is
/// sufficient.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    technicians: Vec<String>,
}

impl StaticDirectory {
    /// Create a directory from a list of technician emails.
    #[must_use]
    pub const fn new(technicians: Vec<String>) -> Self {
        Self { technicians }
    }

    /// Parse a comma-separated list of technician emails.
    #[must_use]
    pub fn from_list(raw: &str) -> Self {
        let technicians = raw
            .split(',')
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(ToString::to_string)
            .collect();
        Self { technicians }
    }
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn technician_emails(&self) -> Result<Vec<String>> {
        Ok(self.technicians.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_comma_separated_list() {
        let directory = StaticDirectory::from_list(" a@example.com, b@example.com ,");
        let emails = directory.technician_emails().await.unwrap();
        assert_eq!(emails, vec!["a@example.com", "b@example.com"]);
    }

    #[tokio::test]
    async fn empty_list_yields_no_technicians() {
        let directory = StaticDirectory::from_list("");
        assert!(directory.technician_emails().await.unwrap().is_empty());
    }
}
