//! Route table and middleware stack.

use crate::handlers::{customers, health, technicians, tickets};
use crate::middleware::{correlation_id_middleware, session_middleware};
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use repairshop_store::{CustomerStore, TicketStore};
use tower_http::trace::TraceLayer;

/// Build the full application router over any store implementation.
pub fn app_router<S>(state: AppState<S>) -> Router
where
    S: CustomerStore + TicketStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/customers",
            get(customers::list::<S>).post(customers::save::<S>),
        )
        .route(
            "/api/customers/:id",
            get(customers::get_one::<S>).delete(customers::delete::<S>),
        )
        .route(
            "/api/tickets",
            get(tickets::list::<S>).post(tickets::save::<S>),
        )
        .route("/api/tickets/:id", get(tickets::get_one::<S>))
        .route("/api/technicians", get(technicians::list::<S>))
        .layer(axum::middleware::from_fn(correlation_id_middleware))
        .layer(axum::middleware::from_fn(session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
