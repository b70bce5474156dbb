use async_trait::async_trait;

use crate::error::SearchResult;
use crate::models::Embedding;

/// Trait for query embedding providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Whether credentials are present. An unconfigured provider fails
    /// every call with `SearchError::ServiceUnavailable`.
    fn is_configured(&self) -> bool;

    /// Embed one search query
    async fn embed(&self, text: &str) -> SearchResult<Embedding>;
}
