use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::TextEncoder;
use crate::error::{DatastoreError, DatastoreResult};

/// Ollama embedding service configuration
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Full URL of the embeddings endpoint
    pub url: String,
    pub model: String,
    /// Width of the vectors the model produces
    pub dimension: usize,
}

impl OllamaConfig {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            dimension: 4096,
        }
    }
}

impl FromEnv for OllamaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("OLLAMA_HOST", "localhost");
        let port: u16 = env_parse_or_default("OLLAMA_PORT", "11434")?;
        let endpoint = env_or_default("OLLAMA_ENDPOINT", "/api/embeddings");
        let model = env_or_default("OLLAMA_MODEL", "mistral");
        let dimension = env_parse_or_default("EMBEDDING_DIMENSION", "4096")?;

        Ok(Self {
            url: format!("http://{}:{}{}", host, port, endpoint),
            model,
            dimension,
        })
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new("http://localhost:11434/api/embeddings", "mistral")
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Text encoder backed by an Ollama `/api/embeddings` endpoint
pub struct OllamaEncoder {
    client: Client,
    config: OllamaConfig,
}

impl OllamaEncoder {
    pub fn new(client: Client, config: OllamaConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl TextEncoder for OllamaEncoder {
    #[instrument(skip(self, text), fields(model = %self.config.model, text_len = text.len()))]
    async fn encode(&self, text: &str) -> DatastoreResult<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.config.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DatastoreError::Encoder(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DatastoreError::Encoder(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| DatastoreError::Encoder(format!("invalid response body: {}", e)))?;

        debug!(dimension = body.embedding.len(), "Encoded text");
        Ok(body.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn encoder_for(server: &mockito::Server) -> OllamaEncoder {
        let config = OllamaConfig::new(format!("{}/api/embeddings", server.url()), "mistral");
        OllamaEncoder::new(Client::new(), config)
    }

    #[tokio::test]
    async fn test_encode_posts_model_and_prompt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/embeddings")
            .match_body(Matcher::Json(json!({"model": "mistral", "prompt": "hello"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"embedding": [0.1, 0.2, 0.3]}"#)
            .create_async()
            .await;

        let vector = encoder_for(&server).encode("hello").await.unwrap();

        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_encode_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/embeddings")
            .with_status(404)
            .with_body(r#"{"error":"model \"mistral\" not found"}"#)
            .create_async()
            .await;

        let err = encoder_for(&server).encode("hello").await.unwrap_err();

        assert!(matches!(err, DatastoreError::Encoder(_)));
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_encode_missing_embedding_field_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/embeddings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"ok"}"#)
            .create_async()
            .await;

        let err = encoder_for(&server).encode("hello").await.unwrap_err();
        assert!(matches!(err, DatastoreError::Encoder(_)));
    }

    #[tokio::test]
    async fn test_encode_unreachable_service_is_error() {
        let config = OllamaConfig::new("http://127.0.0.1:1/api/embeddings", "mistral");
        let encoder = OllamaEncoder::new(Client::new(), config);

        let err = encoder.encode("hello").await.unwrap_err();
        assert!(matches!(err, DatastoreError::Encoder(_)));
    }

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars_unset(
            [
                "OLLAMA_HOST",
                "OLLAMA_PORT",
                "OLLAMA_ENDPOINT",
                "OLLAMA_MODEL",
                "EMBEDDING_DIMENSION",
            ],
            || {
                let config = OllamaConfig::from_env().unwrap();
                assert_eq!(config.url, "http://localhost:11434/api/embeddings");
                assert_eq!(config.model, "mistral");
                assert_eq!(config.dimension, 4096);
            },
        );
    }

    #[test]
    fn test_config_from_env_overrides() {
        temp_env::with_vars(
            [
                ("OLLAMA_HOST", Some("ollama")),
                ("OLLAMA_PORT", Some("8000")),
                ("OLLAMA_ENDPOINT", Some("/api/embed")),
                ("OLLAMA_MODEL", Some("nomic-embed-text")),
                ("EMBEDDING_DIMENSION", Some("768")),
            ],
            || {
                let config = OllamaConfig::from_env().unwrap();
                assert_eq!(config.url, "http://ollama:8000/api/embed");
                assert_eq!(config.model, "nomic-embed-text");
                assert_eq!(config.dimension, 768);
            },
        );
    }

    #[test]
    fn test_config_invalid_port() {
        temp_env::with_var("OLLAMA_PORT", Some("not-a-port"), || {
            assert!(OllamaConfig::from_env().is_err());
        });
    }
}
