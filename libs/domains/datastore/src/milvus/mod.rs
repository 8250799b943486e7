mod client;
mod config;
mod repository;
pub mod schema;

pub use client::{MilvusClient, SearchHit};
pub use config::MilvusConfig;
pub use repository::MilvusRepository;
