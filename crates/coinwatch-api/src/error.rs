use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use coinwatch_core::{ServiceError, ValidationError};

/// Request-level errors with an explicit HTTP status mapping.
///
/// Over-long ranges and malformed input are client errors; store and
/// worker failures are server errors and never leak internal detail into
/// the response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("query worker failed: {0}")]
    Worker(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            ApiError::Service(ServiceError::InvalidRange { .. }) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Service(ServiceError::Store(error)) => {
                error!(%error, "store query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("internal storage error"),
                )
            }
            ApiError::Worker(detail) => {
                error!(detail = %detail, "query worker failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("internal error"),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
