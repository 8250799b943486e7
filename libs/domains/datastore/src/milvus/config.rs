use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};

/// Milvus connection configuration
#[derive(Debug, Clone)]
pub struct MilvusConfig {
    pub url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl MilvusConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            timeout_secs: 30,
        }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }
}

impl FromEnv for MilvusConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("MILVUS_HOST", "localhost");
        let port: u16 = env_parse_or_default("MILVUS_PORT", "19530")?;
        let token = std::env::var("MILVUS_TOKEN").ok().filter(|t| !t.is_empty());
        let timeout_secs = env_parse_or_default("MILVUS_TIMEOUT_SECS", "30")?;

        Ok(Self {
            url: format!("http://{}:{}", host, port),
            token,
            timeout_secs,
        })
    }
}

impl Default for MilvusConfig {
    fn default() -> Self {
        Self::new("http://localhost:19530")
    }
}
