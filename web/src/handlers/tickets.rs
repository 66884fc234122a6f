//! Ticket routes.

use super::{outcome_response, require_session, SearchParams};
use crate::error::WebResult;
use crate::state::{AppState, CurrentSession};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use repairshop_core::TicketForm;
use repairshop_store::TicketStore;

/// List open tickets, or search all tickets when text is submitted.
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Extension(session): Extension<CurrentSession>,
    Query(params): Query<SearchParams>,
) -> WebResult<Response>
where
    S: TicketStore + Send + Sync + 'static,
{
    if let Err(redirect) = require_session(&session).await {
        return Ok(redirect);
    }
    let tickets = match params.text() {
        Some(text) => state.queries().search_tickets(text).await?,
        None => state.queries().open_tickets().await?,
    };
    Ok(Json(tickets).into_response())
}

/// Fetch one ticket by id.
pub async fn get_one<S>(
    State(state): State<AppState<S>>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<i32>,
) -> WebResult<Response>
where
    S: TicketStore + Send + Sync + 'static,
{
    if let Err(redirect) = require_session(&session).await {
        return Ok(redirect);
    }
    match state.queries().ticket(id).await? {
        Some(ticket) => Ok(Json(ticket).into_response()),
        None => Err(repairshop_store::StoreError::NotFound.into()),
    }
}

/// Create or update a ticket from submitted form data.
pub async fn save<S>(
    State(state): State<AppState<S>>,
    Extension(session): Extension<CurrentSession>,
    Json(form): Json<TicketForm>,
) -> Response
where
    S: TicketStore + Send + Sync + 'static,
{
    let outcome = repairshop_actions::save_ticket(
        state.store(),
        session.provider(),
        state.cache(),
        &form,
    )
    .await;
    outcome_response(&outcome)
}
