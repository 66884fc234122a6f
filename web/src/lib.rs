//! HTTP layer: router, handlers, middleware, and server config.
//!
//! The server sits behind an authenticating proxy; per-request session
//! facts arrive as trusted headers and are turned into a
//! [`CurrentSession`] extension by the session middleware. Protected
//! routes answer unauthenticated callers with a redirect to
//! [`LOGIN_PATH`], which the proxy owns.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

/// Login route owned by the authenticating proxy.
pub const LOGIN_PATH: &str = "/login";

pub use config::ServerConfig;
pub use error::{AppError, WebResult};
pub use router::app_router;
pub use state::{AppState, CurrentSession};
