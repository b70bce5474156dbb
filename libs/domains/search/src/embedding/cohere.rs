use std::time::Duration;

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::EmbeddingProvider;
use crate::error::{SearchError, SearchResult};
use crate::models::Embedding;

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.ai";
pub const DEFAULT_MODEL: &str = "embed-english-light-v3.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const INPUT_TYPE: &str = "search_query";

/// Cohere embedding provider configuration
#[derive(Debug, Clone)]
pub struct CohereConfig {
    /// `None` keeps the provider constructible; calls then return 503.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl CohereConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FromEnv for CohereConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_optional("COHERE_API_KEY"),
            base_url: env_or_default("COHERE_BASE_URL", DEFAULT_BASE_URL),
            model: env_or_default("COHERE_MODEL", DEFAULT_MODEL),
            timeout: Duration::from_secs(env_parse_or(
                "COHERE_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
        })
    }
}

/// Cohere `/v1/embed` client
pub struct CohereProvider {
    client: Client,
    config: CohereConfig,
}

impl CohereProvider {
    pub fn new(config: CohereConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to build Cohere client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> SearchResult<Self> {
        Self::new(CohereConfig::from_env()?)
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/embed", self.config.base_url.trim_end_matches('/'))
    }

    /// Maps send and body-read failures. The client timeout covers both.
    fn request_error(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Embedding(format!(
                "Cohere request timed out after {:?}",
                self.config.timeout
            ))
        } else if err.is_decode() {
            SearchError::Embedding(format!("Invalid Cohere response: {}", err))
        } else {
            SearchError::Embedding(format!("Cohere request failed: {}", err))
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    texts: [&'a str; 1],
    model: &'a str,
    input_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl EmbeddingProvider for CohereProvider {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    #[instrument(skip(self, text), fields(model = %self.config.model))]
    async fn embed(&self, text: &str) -> SearchResult<Embedding> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            SearchError::ServiceUnavailable("COHERE_API_KEY not set".to_string())
        })?;

        let request = EmbedRequest {
            texts: [text],
            model: &self.config.model,
            input_type: INPUT_TYPE,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::Embedding(format!(
                "Cohere API error ({}): {}",
                status, text
            )));
        }

        let body: EmbedResponse = response.json().await.map_err(|e| self.request_error(e))?;

        let embedding = body
            .embeddings
            .into_iter()
            .next()
            .map(Embedding::new)
            .ok_or_else(|| SearchError::Embedding("No embedding returned".to_string()))?;

        tracing::debug!(dimension = embedding.dimension(), "Query embedded");
        Ok(embedding)
    }
}
