use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use axum_helpers::{
    JsonBody,
    errors::responses::{BadRequestJsonResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::DatastoreResult;
use crate::models::{CollectionCommand, Document, SearchCommand, UpsertDocumentsCommand};
use crate::repository::DatastoreRepository;
use crate::service::DatastoreService;

/// OpenAPI documentation for the Datastore API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_collection,
        delete_collection,
        list_collections,
        upsert_documents,
        search_documents,
    ),
    components(
        schemas(Document, CollectionCommand, UpsertDocumentsCommand, SearchCommand),
        responses(BadRequestJsonResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Datastore", description = "Collection management and semantic document search")
    )
)]
pub struct DatastoreApiDoc;

/// Create the datastore router with all HTTP endpoints
pub fn router<R: DatastoreRepository + 'static>(service: DatastoreService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create", post(create_collection))
        .route("/delete", delete(delete_collection))
        .route("/list", get(list_collections))
        .route("/upsert", post(upsert_documents))
        .route("/search", post(search_documents))
        .with_state(shared_service)
}

/// Create a collection with the document schema and vector index
#[utoipa::path(
    post,
    path = "/create",
    tag = "Datastore",
    request_body = CollectionCommand,
    responses(
        (status = 201, description = "Collection created"),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_collection<R: DatastoreRepository>(
    State(service): State<Arc<DatastoreService<R>>>,
    JsonBody(command): JsonBody<CollectionCommand>,
) -> DatastoreResult<StatusCode> {
    service.create_collection(&command.collection_name).await?;
    Ok(StatusCode::CREATED)
}

/// Drop a collection
#[utoipa::path(
    delete,
    path = "/delete",
    tag = "Datastore",
    request_body = CollectionCommand,
    responses(
        (status = 201, description = "Collection deleted"),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_collection<R: DatastoreRepository>(
    State(service): State<Arc<DatastoreService<R>>>,
    JsonBody(command): JsonBody<CollectionCommand>,
) -> DatastoreResult<StatusCode> {
    service.delete_collection(&command.collection_name).await?;
    Ok(StatusCode::CREATED)
}

/// List all collection names
#[utoipa::path(
    get,
    path = "/list",
    tag = "Datastore",
    responses(
        (status = 200, description = "Collection names", body = Vec<String>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_collections<R: DatastoreRepository>(
    State(service): State<Arc<DatastoreService<R>>>,
) -> DatastoreResult<Json<Vec<String>>> {
    let names = service.list().await?;
    Ok(Json(names))
}

/// Insert or replace documents by ID
#[utoipa::path(
    post,
    path = "/upsert",
    tag = "Datastore",
    request_body = UpsertDocumentsCommand,
    responses(
        (status = 201, description = "Documents upserted"),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upsert_documents<R: DatastoreRepository>(
    State(service): State<Arc<DatastoreService<R>>>,
    JsonBody(command): JsonBody<UpsertDocumentsCommand>,
) -> DatastoreResult<StatusCode> {
    service
        .upsert_documents(&command.collection_name, command.documents)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Find the documents most similar to a query
#[utoipa::path(
    post,
    path = "/search",
    tag = "Datastore",
    request_body = SearchCommand,
    responses(
        (status = 200, description = "Best matches, most similar first", body = Vec<Document>),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_documents<R: DatastoreRepository>(
    State(service): State<Arc<DatastoreService<R>>>,
    JsonBody(command): JsonBody<SearchCommand>,
) -> DatastoreResult<Json<Vec<Document>>> {
    let documents = service
        .search(&command.collection_name, &command.query)
        .await?;
    Ok(Json(documents))
}
