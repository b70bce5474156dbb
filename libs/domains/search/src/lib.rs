//! Search Domain Library
//!
//! Semantic search over an indexed paper corpus: a query is embedded with
//! Cohere, matched against a Pinecone index and returned one page at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  SearchService  │  ← validation, pagination window, projection
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐     ┌──────────────────┐
//! │   VectorStore   │     │ EmbeddingProvider│
//! │    (trait)      │     │     (trait)      │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//! ┌────────▼────────┐     ┌────────▼─────────┐
//! │  PineconeIndex  │     │  CohereProvider  │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_search::{CohereProvider, PineconeConfig, PineconeIndex, SearchService};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = Arc::new(CohereProvider::from_env()?);
//! let index = PineconeIndex::connect(PineconeConfig::from_env()?).await?;
//!
//! let service = SearchService::new(embedder, Some(index));
//! let page = service.search("graph neural networks", 5, 1).await?;
//! println!("{} of {} fetched", page.results.len(), page.total);
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pinecone;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{CohereConfig, CohereProvider, EmbeddingProvider};
pub use error::{SearchError, SearchResult};
pub use handlers::ApiDoc as SearchApiDoc;
pub use models::{
    DEFAULT_PAGE, DEFAULT_TOP_K, Embedding, MAX_FETCH, MAX_TOP_K, Match, PageWindow, SearchHit,
    SearchPage, SearchParams,
};
pub use pinecone::{PineconeConfig, PineconeIndex};
pub use repository::VectorStore;
pub use service::SearchService;
