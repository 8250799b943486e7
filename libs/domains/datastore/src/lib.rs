//! Datastore Domain Library
//!
//! Collection management and semantic document search over Milvus, with
//! embeddings produced by an Ollama model server.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │     handlers     │  ← /create /delete /list /upsert /search
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ DatastoreService │  ← pass-through use cases
//! └────────┬─────────┘
//!          │
//! ┌────────▼──────────┐     ┌──────────────┐
//! │DatastoreRepository│     │  TextEncoder │
//! │     (trait)       │     │   (trait)    │
//! └────────┬──────────┘     └──────┬───────┘
//!          │                       │
//! ┌────────▼─────────┐     ┌───────▼──────┐
//! │ MilvusRepository │────▶│ OllamaEncoder│
//! │  (REST API v2)   │     │              │
//! └──────────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_datastore::{
//!     DatastoreService, MilvusClient, MilvusConfig, MilvusRepository, OllamaConfig,
//!     OllamaEncoder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ollama = OllamaConfig::from_env()?;
//! let dimension = ollama.dimension;
//! let encoder = OllamaEncoder::new(reqwest::Client::new(), ollama);
//!
//! let client = MilvusClient::new(MilvusConfig::from_env()?)?;
//! let repository = MilvusRepository::new(client, encoder, dimension);
//! let service = DatastoreService::new(repository);
//!
//! service.create_collection("docs").await?;
//! let hits = service.search("docs", "hello").await?;
//! # Ok(())
//! # }
//! ```

pub mod encoder;
pub mod error;
pub mod handlers;
pub mod milvus;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use encoder::{OllamaConfig, OllamaEncoder, TextEncoder};
pub use error::{DatastoreError, DatastoreResult};
pub use handlers::DatastoreApiDoc;
pub use milvus::{MilvusClient, MilvusConfig, MilvusRepository};
pub use models::{CollectionCommand, Document, SearchCommand, UpsertDocumentsCommand};
pub use repository::DatastoreRepository;
pub use service::DatastoreService;
