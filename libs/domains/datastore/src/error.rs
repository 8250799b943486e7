use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("Vector store error: {0}")]
    Store(String),

    #[error("Vector store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Encoder error: {0}")]
    Encoder(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DatastoreResult<T> = Result<T, DatastoreError>;

impl DatastoreError {
    /// Prefixes the message with what the adapter was doing.
    pub fn context(self, what: &str) -> Self {
        match self {
            DatastoreError::Store(msg) => DatastoreError::Store(format!("{}: {}", what, msg)),
            DatastoreError::StoreUnavailable(msg) => {
                DatastoreError::StoreUnavailable(format!("{}: {}", what, msg))
            }
            DatastoreError::Encoder(msg) => DatastoreError::Encoder(format!("{}: {}", what, msg)),
            other => other,
        }
    }
}

impl From<ConfigError> for DatastoreError {
    fn from(err: ConfigError) -> Self {
        DatastoreError::Config(err.to_string())
    }
}

/// Every datastore failure is a dependency failure and answers 500.
impl From<DatastoreError> for AppError {
    fn from(err: DatastoreError) -> Self {
        match err {
            DatastoreError::Store(_)
            | DatastoreError::StoreUnavailable(_)
            | DatastoreError::CollectionNotFound(_)
            | DatastoreError::DimensionMismatch { .. } => AppError::VectorStore(err.to_string()),
            DatastoreError::Encoder(_) => AppError::Embedding(err.to_string()),
            DatastoreError::Config(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for DatastoreError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
