use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Transport-level faults. Missing or corrupted data never lands here; the
/// query service answers those with empty collections or sentinel objects.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Task(join_err) => {
                tracing::error!(error = ?join_err, "Query task failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred while computing the analytics".to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
