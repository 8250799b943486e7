//! Readiness check against the vector store.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_datastore::{MilvusRepository, OllamaEncoder};

type Repository = MilvusRepository<OllamaEncoder>;

/// Readiness endpoint: 200 when Milvus answers, 503 otherwise.
pub async fn ready_handler(State(repository): State<Arc<Repository>>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "milvus",
        Box::pin(async {
            repository
                .health_check()
                .await
                .map_err(|e| format!("Milvus check failed: {}", e))
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

pub fn ready_router(repository: Arc<Repository>) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(repository)
}
