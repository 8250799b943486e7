use async_trait::async_trait;

use crate::error::DatastoreResult;

/// Turns text into an embedding vector
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextEncoder: Send + Sync {
    async fn encode(&self, text: &str) -> DatastoreResult<Vec<f32>>;
}
