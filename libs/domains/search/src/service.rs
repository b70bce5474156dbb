use std::sync::Arc;
use std::time::Instant;

use observability::SearchMetrics;
use tracing::instrument;

use crate::embedding::EmbeddingProvider;
use crate::error::{SearchError, SearchResult};
use crate::models::{MAX_TOP_K, PageWindow, SearchHit, SearchPage};
use crate::repository::VectorStore;

/// Search service: embed the query, fetch neighbours, cut out one page.
///
/// Both collaborators are injected at construction. A `None` store means
/// `PINECONE_API_KEY` was not configured.
pub struct SearchService<S: VectorStore> {
    store: Option<S>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl<S: VectorStore> SearchService<S> {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Option<S>) -> Self {
        Self { store, embedder }
    }

    pub fn embedding_configured(&self) -> bool {
        self.embedder.is_configured()
    }

    pub fn store_configured(&self) -> bool {
        self.store.is_some()
    }

    /// Run one paginated search.
    ///
    /// `total` in the result is the size of the fetched window, capped at
    /// `MAX_FETCH`, not the size of the index.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn search(&self, query: &str, top_k: u32, page: u32) -> SearchResult<SearchPage> {
        let result = self.run(query, top_k, page).await;

        match &result {
            Ok(found) => {
                SearchMetrics::record_request("ok");
                tracing::info!(total = found.total, returned = found.results.len(), "Search completed");
            }
            Err(e) => {
                SearchMetrics::record_request(e.outcome());
                tracing::warn!(error = %e, "Search failed");
            }
        }

        result
    }

    async fn run(&self, query: &str, top_k: u32, page: u32) -> SearchResult<SearchPage> {
        if !(1..=MAX_TOP_K).contains(&top_k) {
            return Err(SearchError::Validation(format!(
                "top_k must be between 1 and {}",
                MAX_TOP_K
            )));
        }
        if page < 1 {
            return Err(SearchError::Validation("page must be at least 1".to_string()));
        }

        let store = self.store.as_ref().ok_or_else(|| {
            SearchError::ServiceUnavailable("PINECONE_API_KEY not set".to_string())
        })?;

        let window = PageWindow::new(top_k, page);

        let started = Instant::now();
        let embedded = self.embedder.embed(query).await;
        SearchMetrics::record_upstream("embedding", started.elapsed(), embedded.is_ok());
        let embedding = embedded?;

        let started = Instant::now();
        let fetched = store.query(embedding.values, window.fetch_k).await;
        SearchMetrics::record_upstream("vector_store", started.elapsed(), fetched.is_ok());
        let matches = fetched?;

        let total = matches.len();
        SearchMetrics::record_fetched(total);

        let results = window
            .slice(matches)
            .into_iter()
            .map(SearchHit::from)
            .collect();

        Ok(SearchPage {
            results,
            total,
            page,
        })
    }
}
