use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for the API surface. Validation failures get a specific
/// message and are never retried; store failures surface as a generic
/// operation failure with the underlying error text attached for
/// diagnostics. Credentials and configuration never appear in messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("Operation failed: {0}")]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ApiError::Store(err) => {
                error!("Store operation failed: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Operation failed: {err}"),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
