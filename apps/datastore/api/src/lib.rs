//! Datastore API
//!
//! HTTP service exposing collection lifecycle and semantic document search.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (JSON over HTTP, /api/datastore/*)
//! domain_datastore::handlers
//!   ↓
//! DatastoreService
//!   ↓
//! MilvusRepository ──→ OllamaEncoder ──→ Ollama
//!   ↓
//! Milvus (REST API v2)
//! ```
//!
//! ## Modules
//!
//! - `config`: environment-driven configuration
//! - `health`: readiness check against Milvus
//! - `openapi`: combined OpenAPI document
//! - `server`: wiring and server lifecycle

pub mod config;
pub mod health;
pub mod openapi;
pub mod server;

pub use config::Config;
pub use server::{AppService, build_app, build_service, run};
