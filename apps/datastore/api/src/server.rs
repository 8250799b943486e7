//! Server wiring and lifecycle
//!
//! - color-eyre and tracing bootstrap
//! - Ollama encoder and Milvus client construction
//! - Router assembly (datastore routes, docs, health, readiness)
//! - HTTP server with graceful shutdown

use axum::Router;
use axum_helpers::server::{create_app, create_router, health_router};
use core_config::AppInfo;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_datastore::{
    DatastoreService, MilvusClient, MilvusRepository, OllamaEncoder, handlers,
};
use eyre::{Result, WrapErr};
use tracing::info;

use crate::config::Config;
use crate::health::ready_router;
use crate::openapi::ApiDoc;

pub type AppService = DatastoreService<MilvusRepository<OllamaEncoder>>;

/// Run the HTTP server
///
/// # Errors
///
/// Returns an error if configuration is invalid, the HTTP clients cannot be
/// built, the listener cannot bind or the server fails while running.
pub async fn run() -> Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let service = build_service(&config)?;
    let app = build_app(service, config.app).await?;

    info!(
        name = config.app.name,
        version = config.app.version,
        "Starting datastore API"
    );

    create_app(app, &config.server)
        .await
        .wrap_err("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

/// Constructs the long-lived clients and the service on top of them.
pub fn build_service(config: &Config) -> Result<AppService> {
    info!(
        model = %config.ollama.model,
        url = %config.ollama.url,
        dimension = config.ollama.dimension,
        "Configuring Ollama encoder"
    );
    let encoder = OllamaEncoder::new(reqwest::Client::new(), config.ollama.clone());

    info!("Configuring Milvus client for {}", config.milvus.url);
    let client =
        MilvusClient::new(config.milvus.clone()).wrap_err("Failed to build Milvus client")?;

    let repository = MilvusRepository::new(client, encoder, config.ollama.dimension);
    Ok(DatastoreService::new(repository))
}

/// Assembles the full router: `/api/datastore/*`, Swagger UI, `/health`, `/ready`.
pub async fn build_app(service: AppService, app_info: AppInfo) -> Result<Router> {
    let repository = service.repository().clone();

    let api_routes = Router::new().nest("/datastore", handlers::router(service));
    let router = create_router::<ApiDoc>(api_routes)
        .await
        .wrap_err("Failed to build router")?;

    Ok(router
        .merge(health_router(app_info))
        .merge(ready_router(repository)))
}
