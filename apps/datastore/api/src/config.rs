use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_datastore::{MilvusConfig, OllamaConfig};

pub use core_config::Environment;

/// Application configuration
/// Composes shared config components with the store and encoder settings
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub milvus: MilvusConfig,
    pub ollama: OllamaConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let milvus = MilvusConfig::from_env()?;
        let ollama = OllamaConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            milvus,
            ollama,
        })
    }
}
