//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// Report the service as up. Sits outside the session gate.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
