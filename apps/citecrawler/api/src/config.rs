use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_search::{CohereConfig, PineconeConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub cohere: CohereConfig,
    pub pinecone: PineconeConfig,
}

impl Config {
    /// Missing API keys are not errors here; they surface as 503 on `/search`.
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8000
        let cohere = CohereConfig::from_env()?;
        let pinecone = PineconeConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            cohere,
            pinecone,
        })
    }
}
