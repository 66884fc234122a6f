//! Handler-level errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use repairshop_auth::AuthError;
use repairshop_store::StoreError;
use serde_json::json;

/// Convenience alias for handler return types.
pub type WebResult<T> = Result<T, AppError>;

/// Failures a handler can surface.
///
/// Details are logged server-side; the wire body stays generic.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The store failed or the row was missing where required.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The identity provider or directory could not be consulted.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let message = match status {
            StatusCode::NOT_FOUND => "Not found",
            _ => "Internal server error",
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_map_to_404() {
        let response = AppError::from(StoreError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failures_map_to_500() {
        let response =
            AppError::from(StoreError::Database("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
