//! Session and directory collaborators for the repair-shop service.
//!
//! The third-party identity provider itself stays outside this
//! codebase. This crate defines the narrow surface the application
//! consumes: whether the caller is authenticated, who they are, and
//! which capabilities were granted. It also ships the
//! auth-proxy-header implementation used in deployment and mocks for
//! tests.

pub mod directory;
pub mod error;
#[cfg(feature = "test-utils")]
pub mod mocks;
pub mod provider;
pub mod proxy;

pub use directory::StaticDirectory;
pub use error::{AuthError, Result};
pub use provider::{AuthUser, MANAGER_PERMISSION, SessionProvider, UserDirectory};
pub use proxy::{AUTH_EMAIL_HEADER, AUTH_GROUPS_HEADER, ProxyHeaderSession};
