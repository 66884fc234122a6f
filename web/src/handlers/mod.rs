//! Route handlers.

pub mod customers;
pub mod health;
pub mod technicians;
pub mod tickets;

use crate::state::CurrentSession;
use crate::LOGIN_PATH;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use repairshop_actions::ActionOutcome;
use repairshop_core::ActionResult;
use serde::Deserialize;

/// Free-text search, as submitted by the listing views.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search text; absent or blank means the unfiltered view.
    #[serde(rename = "searchText")]
    pub search_text: Option<String>,
}

impl SearchParams {
    /// The trimmed search text, if any was submitted.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Session gate for protected reads. Anonymous callers and provider
/// outages both land on the login flow.
pub(crate) async fn require_session(session: &CurrentSession) -> Result<(), Response> {
    match session.provider().is_authenticated().await {
        Ok(true) => Ok(()),
        Ok(false) => Err(Redirect::to(LOGIN_PATH).into_response()),
        Err(error) => {
            tracing::warn!(error = %error, "session check failed, redirecting to login");
            Err(Redirect::to(LOGIN_PATH).into_response())
        }
    }
}

/// Render a mutation result with its own status code.
pub(crate) fn result_response(result: &ActionResult) -> Response {
    let status =
        StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result)).into_response()
}

/// Render a mutation outcome, turning the login case into a redirect.
pub(crate) fn outcome_response(outcome: &ActionOutcome) -> Response {
    match outcome {
        ActionOutcome::Completed(result) => result_response(result),
        ActionOutcome::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
    }
}
