//! Datastore Service - use-case layer
//!
//! Each method forwards to the repository and returns its result untouched.
//! The service exists so handlers never depend on a concrete store.

use std::sync::Arc;
use tracing::instrument;

use crate::error::DatastoreResult;
use crate::models::Document;
use crate::repository::DatastoreRepository;

pub struct DatastoreService<R: DatastoreRepository> {
    repository: Arc<R>,
}

impl<R: DatastoreRepository> DatastoreService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Shared handle to the repository, used by readiness checks
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    #[instrument(skip(self))]
    pub async fn create_collection(&self, name: &str) -> DatastoreResult<()> {
        self.repository.create_collection(name).await
    }

    #[instrument(skip(self))]
    pub async fn delete_collection(&self, name: &str) -> DatastoreResult<()> {
        self.repository.delete_collection(name).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> DatastoreResult<Vec<String>> {
        self.repository.list().await
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn upsert_documents(
        &self,
        collection_name: &str,
        documents: Vec<Document>,
    ) -> DatastoreResult<()> {
        self.repository
            .upsert_documents(collection_name, documents)
            .await
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        collection_name: &str,
        query: &str,
    ) -> DatastoreResult<Vec<Document>> {
        self.repository.search(collection_name, query).await
    }
}

impl<R: DatastoreRepository> Clone for DatastoreService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
