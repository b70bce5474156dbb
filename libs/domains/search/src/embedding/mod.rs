mod cohere;
mod provider;

pub use cohere::{CohereConfig, CohereProvider};
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
