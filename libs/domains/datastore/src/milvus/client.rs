use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::MilvusConfig;
use super::schema::{CollectionSchema, EMBEDDING_FIELD, IndexSettings, SearchSettings};
use crate::error::{DatastoreError, DatastoreResult};

/// Milvus REST API v2 envelope
#[derive(Debug, Deserialize)]
struct MilvusResponse<T> {
    code: i32,
    data: Option<T>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HasCollection {
    has: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResult {
    #[serde(default)]
    upsert_count: u64,
}

/// One search hit with the requested output fields
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams {
    metric_type: &'static str,
    params: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    collection_name: &'a str,
    data: [&'a [f32]; 1],
    anns_field: &'static str,
    limit: u32,
    offset: u32,
    output_fields: &'a [&'a str],
    search_params: SearchParams,
    consistency_level: &'static str,
}

/// Thin client over the Milvus RESTful API (`/v2/vectordb/...`).
///
/// Holds one long-lived `reqwest::Client`. Every call is a JSON POST; a
/// non-2xx status or a non-zero envelope `code` is returned as
/// [`DatastoreError::Store`], a transport failure as
/// [`DatastoreError::StoreUnavailable`].
#[derive(Clone)]
pub struct MilvusClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl MilvusClient {
    pub fn new(config: MilvusConfig) -> DatastoreResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DatastoreError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::from_client(http, config))
    }

    pub fn from_client(http: Client, config: MilvusConfig) -> Self {
        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token,
        }
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> DatastoreResult<Option<T>> {
        let url = format!("{}/v2/vectordb{}", self.base_url, path);

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DatastoreError::StoreUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DatastoreError::Store(format!(
                "Milvus API error ({}): {}",
                status, error_text
            )));
        }

        let envelope: MilvusResponse<T> = response
            .json()
            .await
            .map_err(|e| DatastoreError::Store(format!("invalid response body: {}", e)))?;

        if envelope.code != 0 {
            return Err(DatastoreError::Store(
                envelope
                    .message
                    .unwrap_or_else(|| format!("Milvus returned code {}", envelope.code)),
            ));
        }

        Ok(envelope.data)
    }

    #[instrument(skip(self, schema))]
    pub async fn create_collection(
        &self,
        name: &str,
        schema: &CollectionSchema,
        shards_num: u32,
    ) -> DatastoreResult<()> {
        let body = json!({
            "collectionName": name,
            "schema": schema,
            "params": { "shardsNum": shards_num },
        });
        self.post::<Value>("/collections/create", &body).await?;
        Ok(())
    }

    #[instrument(skip(self, index))]
    pub async fn create_index(&self, name: &str, index: &IndexSettings) -> DatastoreResult<()> {
        let body = json!({
            "collectionName": name,
            "indexParams": [index],
        });
        self.post::<Value>("/indexes/create", &body).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn drop_collection(&self, name: &str) -> DatastoreResult<()> {
        self.post::<Value>("/collections/drop", &json!({ "collectionName": name }))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn has_collection(&self, name: &str) -> DatastoreResult<bool> {
        let data: Option<HasCollection> = self
            .post("/collections/has", &json!({ "collectionName": name }))
            .await?;
        Ok(data.is_some_and(|d| d.has))
    }

    #[instrument(skip(self))]
    pub async fn list_collections(&self) -> DatastoreResult<Vec<String>> {
        let data: Option<Vec<String>> = self.post("/collections/list", &json!({})).await?;
        Ok(data.unwrap_or_default())
    }

    /// Upserts row-oriented entities, returning the count Milvus reports.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn upsert(&self, name: &str, rows: Vec<Value>) -> DatastoreResult<u64> {
        let body = json!({
            "collectionName": name,
            "data": rows,
        });
        let data: Option<UpsertResult> = self.post("/entities/upsert", &body).await?;
        Ok(data.unwrap_or_default().upsert_count)
    }

    #[instrument(skip(self))]
    pub async fn load_collection(&self, name: &str) -> DatastoreResult<()> {
        self.post::<Value>("/collections/load", &json!({ "collectionName": name }))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn release_collection(&self, name: &str) -> DatastoreResult<()> {
        self.post::<Value>("/collections/release", &json!({ "collectionName": name }))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, vector, settings, output_fields))]
    pub async fn search(
        &self,
        name: &str,
        vector: &[f32],
        settings: &SearchSettings,
        output_fields: &[&str],
    ) -> DatastoreResult<Vec<SearchHit>> {
        let body = SearchRequest {
            collection_name: name,
            data: [vector],
            anns_field: EMBEDDING_FIELD,
            limit: settings.limit,
            offset: settings.offset,
            output_fields,
            search_params: SearchParams {
                metric_type: settings.metric_type,
                params: json!({ "nprobe": settings.nprobe }),
            },
            consistency_level: settings.consistency_level,
        };

        let hits: Vec<SearchHit> = self
            .post("/entities/search", &body)
            .await?
            .unwrap_or_default();
        debug!(hits = hits.len(), "Search completed");
        Ok(hits)
    }
}
