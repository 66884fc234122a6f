//! Customer routes.

use super::{outcome_response, require_session, result_response, SearchParams};
use crate::error::WebResult;
use crate::state::{AppState, CurrentSession};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use repairshop_core::CustomerForm;
use repairshop_store::CustomerStore;

/// List all customers, or search them when text is submitted.
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Extension(session): Extension<CurrentSession>,
    Query(params): Query<SearchParams>,
) -> WebResult<Response>
where
    S: CustomerStore + Send + Sync + 'static,
{
    if let Err(redirect) = require_session(&session).await {
        return Ok(redirect);
    }
    let customers = match params.text() {
        Some(text) => state.queries().search_customers(text).await?,
        None => state.queries().customers().await?,
    };
    Ok(Json(customers).into_response())
}

/// Fetch one customer by id.
pub async fn get_one<S>(
    State(state): State<AppState<S>>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<i32>,
) -> WebResult<Response>
where
    S: CustomerStore + Send + Sync + 'static,
{
    if let Err(redirect) = require_session(&session).await {
        return Ok(redirect);
    }
    match state.queries().customer(id).await? {
        Some(customer) => Ok(Json(customer).into_response()),
        None => Err(repairshop_store::StoreError::NotFound.into()),
    }
}

/// Create or update a customer from submitted form data.
pub async fn save<S>(
    State(state): State<AppState<S>>,
    Extension(session): Extension<CurrentSession>,
    Json(form): Json<CustomerForm>,
) -> Response
where
    S: CustomerStore + Send + Sync + 'static,
{
    let outcome = repairshop_actions::save_customer(
        state.store(),
        session.provider(),
        state.cache(),
        &form,
    )
    .await;
    outcome_response(&outcome)
}

/// Delete a customer by id.
pub async fn delete<S>(State(state): State<AppState<S>>, Path(id): Path<i32>) -> Response
where
    S: CustomerStore + Send + Sync + 'static,
{
    let result = repairshop_actions::delete_customer(state.store(), state.cache(), id).await;
    result_response(&result)
}
