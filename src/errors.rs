use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Request-level failures. Store errors are never fatal to the process;
/// each request fails on its own.
#[derive(Error, Debug)]
pub enum StampdError {
    /// The key-value store cannot be reached (or the call timed out despite
    /// the client's own reconnect policy).
    #[error("key-value store unavailable: {0}")]
    StoreUnavailable(#[from] redis::RedisError),

    /// The store handed back bytes that are not valid text.
    #[error("stored value is not valid UTF-8")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The counter key holds something that is not a decimal integer.
    #[error("stored counter is not an integer")]
    BadCounter(#[from] std::num::ParseIntError),
}

impl IntoResponse for StampdError {
    fn into_response(self) -> Response {
        let status = match self {
            StampdError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StampdError::Decode(_) | StampdError::BadCounter(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        tracing::error!("request failed: {self}");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
