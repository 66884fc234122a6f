//! Action outcomes.

use repairshop_auth::SessionProvider;
use repairshop_core::ActionResult;

/// Session gate shared by the authenticated mutations. A provider
/// outage counts as unauthenticated so the caller lands on the login
/// flow instead of an opaque failure.
pub(crate) async fn session_is_valid(session: &dyn SessionProvider) -> bool {
    match session.is_authenticated().await {
        Ok(valid) => valid,
        Err(error) => {
            tracing::warn!(error = %error, "session check failed, treating as unauthenticated");
            false
        }
    }
}

/// What an authenticated mutation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action ran and produced a presentable result.
    Completed(ActionResult),
    /// No valid session; the caller must sign in first.
    RedirectToLogin,
}

impl ActionOutcome {
    /// The completed result, if the action ran.
    #[must_use]
    pub const fn result(&self) -> Option<&ActionResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::RedirectToLogin => None,
        }
    }
}

impl From<ActionResult> for ActionOutcome {
    fn from(result: ActionResult) -> Self {
        Self::Completed(result)
    }
}
