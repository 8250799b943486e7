use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Datastore API",
        version = "0.1.0",
        description = "Collection management and semantic search over Milvus with Ollama embeddings"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/datastore", api = domain_datastore::DatastoreApiDoc)
    )
)]
pub struct ApiDoc;
