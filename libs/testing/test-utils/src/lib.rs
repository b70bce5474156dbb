//! Shared test utilities for the search gateway
//!
//! This crate provides reusable test infrastructure:
//! - `MockCohere`: local HTTP server speaking the Cohere embed API
//! - `MockPinecone`: local HTTP server speaking the Pinecone control and data planes
//! - `TestDataBuilder`: Deterministic match fixtures
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{MockCohere, MockPinecone, TestDataBuilder, TEST_INDEX};
//!
//! #[tokio::test]
//! async fn my_search_test() {
//!     let mut cohere = MockCohere::start().await;
//!     let mut pinecone = MockPinecone::start().await;
//!     let builder = TestDataBuilder::from_test_name("my_search_test");
//!
//!     let _embed = cohere.expect_embedding(&[0.1, 0.2]).await;
//!     let _describe = pinecone.expect_describe(TEST_INDEX).await;
//!     let _query = pinecone.expect_query(5, builder.matches(&[0.9, 0.8])).await;
//! }
//! ```
//!
//! Keep the returned `Mock` values alive for the duration of the test;
//! dropping one removes the expectation from its server.

mod cohere;
mod pinecone;

pub use cohere::MockCohere;
pub use pinecone::MockPinecone;

use serde_json::{Value, json};

/// API key both mock servers require
pub const TEST_API_KEY: &str = "test-api-key";

pub const TEST_INDEX: &str = "papers-index";

/// Builder for test data with deterministic randomization
///
/// Ids and titles derive from the seed, so a given test always sees the same papers.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_first_page");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Paper id for rank `index`, e.g. `paper-12345-0`
    pub fn paper_id(&self, index: usize) -> String {
        format!("paper-{}-{}", self.seed, index)
    }

    /// One Pinecone match with full metadata
    pub fn paper(&self, index: usize, score: f64) -> Value {
        json!({
            "id": self.paper_id(index),
            "score": score,
            "metadata": {
                "title": format!("Paper {} of {}", index, self.seed),
                "link": format!("https://arxiv.org/abs/{}.{:05}", self.seed % 10_000, index),
                "abstract": format!("Abstract for paper {}", index)
            }
        })
    }

    /// Matches in the given order, one per score
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// let matches = builder.matches(&[0.91, 0.88]);
    /// assert_eq!(matches.as_array().unwrap().len(), 2);
    /// ```
    pub fn matches(&self, scores: &[f64]) -> Value {
        Value::Array(
            scores
                .iter()
                .enumerate()
                .map(|(i, score)| self.paper(i, *score))
                .collect(),
        )
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert that a search response is a well-formed page
    pub fn assert_search_page(body: &Value, expected_page: u64) {
        assert_eq!(body["page"], expected_page, "unexpected page in {}", body);
        assert!(body["total"].is_u64(), "total missing in {}", body);
        assert!(body["results"].is_array(), "results missing in {}", body);
    }

    /// Assert that result scores never increase
    pub fn assert_scores_descending(body: &Value) {
        let scores: Vec<f64> = body["results"]
            .as_array()
            .map(|results| results.iter().filter_map(|r| r["score"].as_f64()).collect())
            .unwrap_or_default();

        assert!(
            scores.windows(2).all(|w| w[0] >= w[1]),
            "scores not descending: {:?}",
            scores
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.paper_id(0), builder2.paper_id(0));
        assert_eq!(builder1.matches(&[0.5]), builder2.matches(&[0.5]));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.paper_id(0), builder2.paper_id(0));
    }

    #[test]
    fn test_matches_keep_score_order() {
        let matches = TestDataBuilder::new(1).matches(&[0.9, 0.7, 0.8]);
        let scores: Vec<f64> = matches
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["score"].as_f64().unwrap())
            .collect();

        assert_eq!(scores, vec![0.9, 0.7, 0.8]);
    }
}
