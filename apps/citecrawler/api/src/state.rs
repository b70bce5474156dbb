//! Application state management.
//!
//! Clients for Cohere and Pinecone are built once here, at startup, and
//! shared by every request through the search service.

use std::sync::Arc;

use domain_search::{CohereProvider, EmbeddingProvider, PineconeIndex, SearchService};
use tracing::{info, warn};

use crate::config::Config;

/// Shared application state.
///
/// Cloned for each handler; the search service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    pub search: Arc<SearchService<PineconeIndex>>,
}

impl AppState {
    /// Build the upstream clients.
    ///
    /// Without `PINECONE_API_KEY` the index is left unset and searches
    /// answer 503. With a key, failing to resolve the index aborts startup.
    pub async fn build(config: Config) -> eyre::Result<Self> {
        let embedder = CohereProvider::new(config.cohere.clone())?;
        if !embedder.is_configured() {
            warn!("COHERE_API_KEY not set, /search will answer 503");
        }

        let index = if config.pinecone.is_configured() {
            info!("Connecting to Pinecone index {}", config.pinecone.index_name);
            Some(PineconeIndex::connect(config.pinecone.clone()).await?)
        } else {
            warn!("PINECONE_API_KEY not set, /search will answer 503");
            None
        };

        let search = SearchService::new(Arc::new(embedder), index);

        Ok(Self {
            config,
            search: Arc::new(search),
        })
    }
}
