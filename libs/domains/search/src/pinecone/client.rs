use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::PineconeConfig;
use super::config::API_VERSION;
use crate::error::{SearchError, SearchResult};
use crate::models::Match;
use crate::repository::VectorStore;

/// Handle to one Pinecone index, resolved once at startup
pub struct PineconeIndex {
    client: Client,
    index_name: String,
    host_url: String,
}

impl PineconeIndex {
    /// Builds the HTTP client and resolves the index data-plane host.
    ///
    /// # Errors
    /// `ServiceUnavailable` without an API key, `Config` when the index does
    /// not exist, `VectorStore` on any other control-plane failure.
    pub async fn connect(config: PineconeConfig) -> SearchResult<Self> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            SearchError::ServiceUnavailable("PINECONE_API_KEY not set".to_string())
        })?;

        let client = Client::builder()
            .default_headers(default_headers(api_key)?)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to build Pinecone client: {}", e)))?;

        let host = match &config.index_host {
            Some(host) => host.clone(),
            None => describe_index(&client, &config).await?,
        };
        let host_url = normalize_host(&host);

        info!(index = %config.index_name, host = %host_url, "Connected to Pinecone index");

        Ok(Self {
            client,
            index_name: config.index_name,
            host_url,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }
}

fn default_headers(api_key: &str) -> SearchResult<HeaderMap> {
    let mut key = HeaderValue::from_str(api_key)
        .map_err(|_| SearchError::Config("PINECONE_API_KEY is not a valid header value".to_string()))?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert("Api-Key", key);
    headers.insert("X-Pinecone-API-Version", HeaderValue::from_static(API_VERSION));
    Ok(headers)
}

/// Hosts from the control plane come without a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
    #[serde(default)]
    status: Option<IndexStatus>,
}

#[derive(Debug, Deserialize)]
struct IndexStatus {
    #[serde(default)]
    ready: bool,
    #[serde(default)]
    state: String,
}

async fn describe_index(client: &Client, config: &PineconeConfig) -> SearchResult<String> {
    let url = format!(
        "{}/indexes/{}",
        config.control_url.trim_end_matches('/'),
        config.index_name
    );

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| SearchError::VectorStore(format!("Pinecone describe_index failed: {}", e)))?;

    match response.status() {
        status if status.is_success() => {}
        StatusCode::NOT_FOUND => {
            return Err(SearchError::Config(format!(
                "Pinecone index '{}' not found",
                config.index_name
            )));
        }
        status => {
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::VectorStore(format!(
                "Pinecone API error ({}): {}",
                status, text
            )));
        }
    }

    let description: IndexDescription = response
        .json()
        .await
        .map_err(|e| SearchError::VectorStore(format!("Invalid describe_index response: {}", e)))?;

    if let Some(status) = description.status.as_ref().filter(|s| !s.ready) {
        tracing::warn!(index = %config.index_name, state = %status.state, "Pinecone index is not ready");
    }

    Ok(description.host)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    vector: Vec<f32>,
    top_k: u32,
    include_metadata: bool,
    include_values: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<WireMatch>,
}

#[derive(Debug, Deserialize)]
struct WireMatch {
    id: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

impl From<WireMatch> for Match {
    fn from(m: WireMatch) -> Self {
        Match {
            id: m.id,
            score: m.score,
            metadata: m.metadata.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl VectorStore for PineconeIndex {
    #[instrument(skip(self, vector), fields(index = %self.index_name, dimension = vector.len()))]
    async fn query(&self, vector: Vec<f32>, top_k: u32) -> SearchResult<Vec<Match>> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            include_values: false,
        };

        let response = self
            .client
            .post(format!("{}/query", self.host_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::VectorStore("Pinecone query timed out".to_string())
                } else {
                    SearchError::VectorStore(format!("Pinecone query failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::VectorStore(format!(
                "Pinecone API error ({}): {}",
                status, text
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| SearchError::VectorStore(format!("Invalid Pinecone response: {}", e)))?;

        tracing::debug!(matches = body.matches.len(), "Pinecone query finished");
        Ok(body.matches.into_iter().map(Match::from).collect())
    }
}
