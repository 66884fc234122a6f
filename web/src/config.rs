//! Server configuration from the environment.

use std::env;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Environment-driven server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// PostgreSQL connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Listen address (`BIND_ADDR`, defaults to `0.0.0.0:3000`).
    pub bind_addr: String,
    /// Comma-separated technician emails (`TECHNICIANS`).
    pub technicians: String,
}

/// A required environment variable was missing.
#[derive(Debug, thiserror::Error)]
#[error("missing required environment variable {0}")]
pub struct MissingVar(pub &'static str);

impl ServerConfig {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`MissingVar`] when `DATABASE_URL` is unset.
    pub fn load() -> Result<Self, MissingVar> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`MissingVar`] when `DATABASE_URL` is absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MissingVar>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(MissingVar("DATABASE_URL"))?;
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let technicians = lookup("TECHNICIANS").unwrap_or_default();
        Ok(Self {
            database_url,
            bind_addr,
            technicians,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn database_url_is_required() {
        let err = ServerConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err.0, "DATABASE_URL");
    }

    #[test]
    fn optional_settings_have_defaults() {
        let config = ServerConfig::from_lookup(|name| {
            (name == "DATABASE_URL").then(|| "postgres://localhost/repairshop".to_string())
        })
        .unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.technicians, "");
    }

    #[test]
    fn explicit_settings_win() {
        let config = ServerConfig::from_lookup(|name| match name {
            "DATABASE_URL" => Some("postgres://localhost/repairshop".to_string()),
            "BIND_ADDR" => Some("127.0.0.1:8080".to_string()),
            "TECHNICIANS" => Some("a@example.com,b@example.com".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.technicians, "a@example.com,b@example.com");
    }
}
