//! Handler tests for the Datastore domain
//!
//! These drive the real router and service against an in-memory repository
//! whose encoder is a deterministic letter-frequency vector, so similarity
//! ranking is predictable:
//! - Request deserialization and the uniform 400 for malformed bodies
//! - Status codes per route
//! - Collection lifecycle, upsert-by-ID replacement and top-3 search

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_datastore::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const SEARCH_LIMIT: usize = 3;

/// Letter histogram over a-z
fn encode(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0; 26];
    for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
        vector[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
    }
    vector
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm = |v: &[f32]| v.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denominator = norm(a) * norm(b);
    if denominator == 0.0 { 0.0 } else { dot / denominator }
}

#[derive(Default)]
struct InMemoryRepository {
    // Vec keeps creation order for list()
    collections: Mutex<Vec<(String, HashMap<String, (Document, Vec<f32>)>)>>,
}

impl InMemoryRepository {
    fn document_count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == collection)
            .map(|(_, docs)| docs.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DatastoreRepository for InMemoryRepository {
    async fn create_collection(&self, name: &str) -> DatastoreResult<()> {
        let mut collections = self.collections.lock().unwrap();
        if collections.iter().any(|(existing, _)| existing == name) {
            return Err(DatastoreError::Store(format!(
                "collection {} already exists",
                name
            )));
        }
        collections.push((name.to_string(), HashMap::new()));
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> DatastoreResult<()> {
        let mut collections = self.collections.lock().unwrap();
        let position = collections
            .iter()
            .position(|(existing, _)| existing == name)
            .ok_or_else(|| DatastoreError::CollectionNotFound(name.to_string()))?;
        collections.remove(position);
        Ok(())
    }

    async fn list(&self) -> DatastoreResult<Vec<String>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn upsert_documents(
        &self,
        collection_name: &str,
        documents: Vec<Document>,
    ) -> DatastoreResult<()> {
        let mut collections = self.collections.lock().unwrap();
        let (_, docs) = collections
            .iter_mut()
            .find(|(name, _)| name == collection_name)
            .ok_or_else(|| DatastoreError::CollectionNotFound(collection_name.to_string()))?;

        for document in documents {
            let embedding = encode(&document.content);
            docs.insert(document.id.clone(), (document, embedding));
        }
        Ok(())
    }

    async fn search(&self, collection_name: &str, query: &str) -> DatastoreResult<Vec<Document>> {
        let query_vector = encode(query);
        let collections = self.collections.lock().unwrap();
        let (_, docs) = collections
            .iter()
            .find(|(name, _)| name == collection_name)
            .ok_or_else(|| DatastoreError::CollectionNotFound(collection_name.to_string()))?;

        let mut scored: Vec<(f32, &Document)> = docs
            .values()
            .map(|(doc, embedding)| (cosine(&query_vector, embedding), doc))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}

fn setup() -> (Router, DatastoreService<InMemoryRepository>) {
    let service = DatastoreService::new(InMemoryRepository::default());
    (handlers::router(service.clone()), service)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn raw_request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn list(app: &Router) -> Vec<String> {
    let response = send(app, Request::get("/list").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

async fn create(app: &Router, name: &str) -> StatusCode {
    send(app, json_request("POST", "/create", json!({ "collection_name": name })))
        .await
        .status()
}

#[tokio::test]
async fn test_create_then_list_includes_collection() {
    let (app, _) = setup();

    assert_eq!(create(&app, "docs").await, StatusCode::CREATED);
    assert_eq!(create(&app, "notes").await, StatusCode::CREATED);

    assert_eq!(list(&app).await, vec!["docs", "notes"]);
}

#[tokio::test]
async fn test_create_returns_empty_body() {
    let (app, _) = setup();

    let response = send(
        &app,
        json_request("POST", "/create", json!({ "collection_name": "docs" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_delete_then_list_excludes_collection() {
    let (app, _) = setup();
    create(&app, "docs").await;
    create(&app, "notes").await;

    let response = send(
        &app,
        json_request("DELETE", "/delete", json!({ "collection_name": "docs" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(list(&app).await, vec!["notes"]);
}

#[tokio::test]
async fn test_delete_never_created_returns_500_and_keeps_list() {
    let (app, _) = setup();
    create(&app, "docs").await;

    let response = send(
        &app,
        json_request("DELETE", "/delete", json!({ "collection_name": "ghost" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("ghost"));

    assert_eq!(list(&app).await, vec!["docs"]);
}

#[tokio::test]
async fn test_create_store_error_returns_500_with_message() {
    let (app, _) = setup();
    create(&app, "docs").await;

    let response = send(
        &app,
        json_request("POST", "/create", json!({ "collection_name": "docs" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VECTOR_STORE_ERROR");
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_upsert_same_id_replaces_document() {
    let (app, service) = setup();
    create(&app, "docs").await;

    let first = json!({
        "collection_name": "docs",
        "documents": [{"id": "1", "title": "Old", "content": "hello world", "category": "a"}]
    });
    let second = json!({
        "collection_name": "docs",
        "documents": [{"id": "1", "title": "New", "content": "hello there", "category": "b"}]
    });

    assert_eq!(
        send(&app, json_request("POST", "/upsert", first)).await.status(),
        StatusCode::CREATED
    );
    assert_eq!(
        send(&app, json_request("POST", "/upsert", second)).await.status(),
        StatusCode::CREATED
    );

    assert_eq!(service.repository().document_count("docs"), 1);

    let response = send(
        &app,
        json_request("POST", "/search", json!({"collection_name": "docs", "query": "hello"})),
    )
    .await;
    let results: Vec<Document> = json_body(response.into_body()).await;
    assert_eq!(results, vec![Document::new("1", "New", "hello there", "b")]);
}

#[tokio::test]
async fn test_search_returns_closest_within_top_three() {
    let (app, _) = setup();
    create(&app, "docs").await;

    let upsert = json!({
        "collection_name": "docs",
        "documents": [
            {"id": "1", "title": "Rust", "content": "ownership and borrowing", "category": "lang"},
            {"id": "2", "title": "Greeting", "content": "hello world", "category": "misc"},
            {"id": "3", "title": "Physics", "content": "quantum mechanics", "category": "science"},
            {"id": "4", "title": "Cooking", "content": "bake sourdough bread", "category": "food"},
            {"id": "5", "title": "Jazz", "content": "syncopated rhythm", "category": "music"}
        ]
    });
    assert_eq!(
        send(&app, json_request("POST", "/upsert", upsert)).await.status(),
        StatusCode::CREATED
    );

    let response = send(
        &app,
        json_request("POST", "/search", json!({"collection_name": "docs", "query": "hello world"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let results: Vec<Document> = json_body(response.into_body()).await;
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].id, "2");
    assert_eq!(results[0].title, "Greeting");
}

#[tokio::test]
async fn test_end_to_end_create_upsert_search() {
    let (app, _) = setup();

    assert_eq!(create(&app, "docs").await, StatusCode::CREATED);

    let response = send(
        &app,
        json_request(
            "POST",
            "/upsert",
            json!({
                "collection_name": "docs",
                "documents": [{"id": "1", "title": "T", "content": "hello world", "category": "c"}]
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        json_request("POST", "/search", json!({"collection_name": "docs", "query": "hello"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let results: Value = json_body(response.into_body()).await;
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "T");
    assert_eq!(results[0]["id"], "1");
}

#[tokio::test]
async fn test_malformed_json_returns_400_without_side_effects() {
    let (app, service) = setup();
    create(&app, "docs").await;

    for (method, uri) in [
        ("POST", "/create"),
        ("DELETE", "/delete"),
        ("POST", "/upsert"),
        ("POST", "/search"),
    ] {
        let response = send(&app, raw_request(method, uri, r#"{"collection_name": "docs""#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", method, uri);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INVALID_JSON");
    }

    assert_eq!(list(&app).await, vec!["docs"]);
    assert_eq!(service.repository().document_count("docs"), 0);
}

#[tokio::test]
async fn test_missing_fields_return_400() {
    let (app, _) = setup();

    let response = send(
        &app,
        json_request("POST", "/upsert", json!({"collection_name": "docs"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, json_request("POST", "/search", json!({"query": "hello"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let (app, _) = setup();

    let request = Request::builder()
        .method("POST")
        .uri("/create")
        .body(Body::from(r#"{"collection_name": "docs"}"#))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_search_unknown_collection_returns_500() {
    let (app, _) = setup();

    let response = send(
        &app,
        json_request("POST", "/search", json!({"collection_name": "ghost", "query": "hello"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
