pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// Every error leaves the service in this shape:
/// - `code`: integer error code for logging/monitoring (e.g., 2001)
/// - `error`: machine-readable identifier (e.g., "VECTOR_STORE_ERROR")
/// - `message`: the underlying error text
/// - `details`: optional structured details
///
/// ```json
/// {
///   "code": 2001,
///   "error": "VECTOR_STORE_ERROR",
///   "message": "collection not found[collection=docs]"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type so every
/// service answers with the same status mapping and body shape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status code and error code this error maps to.
    pub fn classify(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::InvalidJson(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidJson),
            AppError::VectorStore(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::VectorStoreError)
            }
            AppError::Embedding(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::EmbeddingError)
            }
            AppError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();

        let message = match self {
            AppError::InvalidJson(msg) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                msg
            }
            AppError::VectorStore(msg) => {
                tracing::error!(error_code = code.code(), "Vector store error: {}", msg);
                msg
            }
            AppError::Embedding(msg) => {
                tracing::error!(error_code = code.code(), "Embedding error: {}", msg);
                msg
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                msg
            }
        };

        error_response(status, message, code)
    }
}

/// Helper function to create error responses.
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
