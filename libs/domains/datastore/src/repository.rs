use async_trait::async_trait;

use crate::error::DatastoreResult;
use crate::models::Document;

/// Repository trait for collection and document operations
///
/// Abstracts the vector store. Implementations own embedding: callers hand
/// over plain documents and query text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatastoreRepository: Send + Sync {
    /// Create a collection with the fixed document schema and its vector index
    async fn create_collection(&self, name: &str) -> DatastoreResult<()>;

    /// Drop a collection. Fails if it does not exist.
    async fn delete_collection(&self, name: &str) -> DatastoreResult<()>;

    /// Names of all collections, in store order
    async fn list(&self) -> DatastoreResult<Vec<String>>;

    /// Insert or replace documents keyed by `id`
    async fn upsert_documents(
        &self,
        collection_name: &str,
        documents: Vec<Document>,
    ) -> DatastoreResult<()>;

    /// Documents most similar to `query`, best first
    async fn search(&self, collection_name: &str, query: &str) -> DatastoreResult<Vec<Document>>;
}
