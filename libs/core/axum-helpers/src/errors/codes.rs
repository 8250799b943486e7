//! Type-safe error codes for API responses.
//!
//! Each code carries a client-facing identifier (e.g. `"INVALID_JSON"`), an
//! integer for logs and dashboards (e.g. `1010`) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidJson;
//! assert_eq!(code.as_str(), "INVALID_JSON");
//! assert_eq!(code.code(), 1010);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body is not valid JSON for the target type
    InvalidJson,

    /// Requested route or resource was not found
    NotFound,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    // Upstream dependency errors (2000-2999)
    /// The vector store rejected or failed an operation
    VectorStoreError,

    /// The embedding service failed to produce a vector
    EmbeddingError,
}

impl ErrorCode {
    /// String identifier for programmatic handling by clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::VectorStoreError => "VECTOR_STORE_ERROR",
            Self::EmbeddingError => "EMBEDDING_ERROR",
        }
    }

    /// Integer code for structured logs and metrics.
    ///
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: upstream dependency errors
    pub fn code(&self) -> i32 {
        match self {
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::InvalidJson => 1010,
            Self::VectorStoreError => 2001,
            Self::EmbeddingError => 2002,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
