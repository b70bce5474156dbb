use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or};

pub const DEFAULT_INDEX_NAME: &str = "papers-index";
pub const DEFAULT_CONTROL_URL: &str = "https://api.pinecone.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const API_VERSION: &str = "2024-07";

/// Pinecone connection configuration
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: Option<String>,
    pub index_name: String,
    /// Data-plane host. Skips the describe-index lookup when set.
    pub index_host: Option<String>,
    pub control_url: String,
    pub timeout: Duration,
}

impl PineconeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    pub fn with_index_host(mut self, host: impl Into<String>) -> Self {
        self.index_host = Some(host.into());
        self
    }

    pub fn with_control_url(mut self, url: impl Into<String>) -> Self {
        self.control_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            index_host: None,
            control_url: DEFAULT_CONTROL_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FromEnv for PineconeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_optional("PINECONE_API_KEY"),
            index_name: env_or_default("INDEX_NAME", DEFAULT_INDEX_NAME),
            index_host: env_optional("PINECONE_INDEX_HOST"),
            control_url: env_or_default("PINECONE_CONTROL_URL", DEFAULT_CONTROL_URL),
            timeout: Duration::from_secs(env_parse_or(
                "PINECONE_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
        })
    }
}
