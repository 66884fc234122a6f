//! Technician directory route, manager-only.

use super::require_session;
use crate::error::WebResult;
use crate::state::{AppState, CurrentSession};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use repairshop_auth::MANAGER_PERMISSION;
use serde_json::json;

/// List technician emails for the assignment picker.
///
/// Requires the manager permission; everyone else gets a 403.
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Extension(session): Extension<CurrentSession>,
) -> WebResult<Response>
where
    S: Send + Sync + 'static,
{
    if let Err(redirect) = require_session(&session).await {
        return Ok(redirect);
    }
    let is_manager = session
        .provider()
        .has_permission(MANAGER_PERMISSION)
        .await
        .unwrap_or(false);
    if !is_manager {
        return Ok(
            (StatusCode::FORBIDDEN, Json(json!({ "message": "Forbidden" }))).into_response(),
        );
    }
    let emails = state.directory().technician_emails().await?;
    Ok(Json(emails).into_response())
}
