use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::MilvusClient;
use super::client::SearchHit;
use super::schema::{
    CATEGORY_FIELD, CONTENT_FIELD, CollectionSchema, EMBEDDING_FIELD, ID_FIELD, IndexSettings,
    OUTPUT_FIELDS, SearchSettings, TITLE_FIELD,
};
use crate::encoder::TextEncoder;
use crate::error::{DatastoreError, DatastoreResult};
use crate::models::Document;
use crate::repository::DatastoreRepository;

const DEFAULT_SHARDS: u32 = 1;

/// Milvus-backed implementation of DatastoreRepository
///
/// Embeds document content and search queries with the injected encoder
/// before talking to the store.
pub struct MilvusRepository<E: TextEncoder> {
    client: MilvusClient,
    encoder: Arc<E>,
    schema: CollectionSchema,
    index: IndexSettings,
    search: SearchSettings,
}

impl<E: TextEncoder> MilvusRepository<E> {
    pub fn new(client: MilvusClient, encoder: E, dimension: usize) -> Self {
        Self {
            client,
            encoder: Arc::new(encoder),
            schema: CollectionSchema::documents(dimension),
            index: IndexSettings::default(),
            search: SearchSettings::default(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.schema.dimension().unwrap_or_default()
    }

    /// Cheap round trip used by the readiness check
    pub async fn health_check(&self) -> DatastoreResult<()> {
        self.client.list_collections().await.map(|_| ())
    }

    async fn embed(&self, text: &str) -> DatastoreResult<Vec<f32>> {
        let vector = self.encoder.encode(text).await?;

        let expected = self.dimension();
        if vector.len() != expected {
            return Err(DatastoreError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }

    fn to_row(document: Document, embedding: Vec<f32>) -> Value {
        json!({
            ID_FIELD: document.id,
            TITLE_FIELD: document.title,
            CONTENT_FIELD: document.content,
            CATEGORY_FIELD: document.category,
            EMBEDDING_FIELD: embedding,
        })
    }
}

impl From<SearchHit> for Document {
    fn from(hit: SearchHit) -> Self {
        Document {
            id: hit.id,
            title: hit.title,
            content: hit.content,
            category: hit.category,
        }
    }
}

#[async_trait]
impl<E: TextEncoder + 'static> DatastoreRepository for MilvusRepository<E> {
    #[instrument(skip(self))]
    async fn create_collection(&self, name: &str) -> DatastoreResult<()> {
        self.client
            .create_collection(name, &self.schema, DEFAULT_SHARDS)
            .await
            .map_err(|e| e.context("failed to create collection"))?;

        // A failed index build leaves the collection in place.
        self.client
            .create_index(name, &self.index)
            .await
            .map_err(|e| e.context("failed to create index"))?;

        info!(collection = name, "Collection created");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_collection(&self, name: &str) -> DatastoreResult<()> {
        if !self.client.has_collection(name).await? {
            return Err(DatastoreError::CollectionNotFound(name.to_string()));
        }

        self.client
            .drop_collection(name)
            .await
            .map_err(|e| e.context("failed to drop collection"))?;

        info!(collection = name, "Collection dropped");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> DatastoreResult<Vec<String>> {
        self.client
            .list_collections()
            .await
            .map_err(|e| e.context("failed to list collections"))
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn upsert_documents(
        &self,
        collection_name: &str,
        documents: Vec<Document>,
    ) -> DatastoreResult<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut rows = Vec::with_capacity(documents.len());
        for document in documents {
            let embedding = self.embed(&document.content).await.map_err(|e| {
                warn!(document_id = %document.id, error = %e, "Failed to encode document");
                e.context(&format!("failed to encode document {}", document.id))
            })?;
            rows.push(Self::to_row(document, embedding));
        }

        let upserted = self
            .client
            .upsert(collection_name, rows)
            .await
            .map_err(|e| e.context("failed to upsert documents"))?;

        info!(collection = collection_name, upserted, "Documents upserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, collection_name: &str, query: &str) -> DatastoreResult<Vec<Document>> {
        let vector = self
            .embed(query)
            .await
            .map_err(|e| e.context("failed to encode query"))?;

        self.client
            .load_collection(collection_name)
            .await
            .map_err(|e| e.context("failed to load collection"))?;

        let result = self
            .client
            .search(collection_name, &vector, &self.search, &OUTPUT_FIELDS)
            .await;

        if let Err(e) = self.client.release_collection(collection_name).await {
            warn!(collection = collection_name, error = %e, "Failed to release collection");
        }

        let hits = result.map_err(|e| e.context("failed to search"))?;
        Ok(hits.into_iter().map(Document::from).collect())
    }
}
