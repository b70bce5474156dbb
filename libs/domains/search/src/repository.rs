use async_trait::async_trait;

use crate::error::SearchResult;
use crate::models::Match;

/// Read-only access to a similarity index
///
/// Implementations return at most `top_k` matches, best first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Nearest-neighbour query with metadata, without stored vector values
    async fn query(&self, vector: Vec<f32>, top_k: u32) -> SearchResult<Vec<Match>>;
}
