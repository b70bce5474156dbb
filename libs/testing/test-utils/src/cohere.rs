use std::io::Write;
use std::time::Duration;

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};

use crate::TEST_API_KEY;

/// Local stand-in for the Cohere embed API
pub struct MockCohere {
    server: ServerGuard,
}

impl MockCohere {
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    /// Base URL to use as `COHERE_BASE_URL`
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Answer `POST /v1/embed` with a single embedding.
    ///
    /// Only requests carrying [`TEST_API_KEY`] and a `search_query` input type match.
    pub async fn expect_embedding(&mut self, values: &[f32]) -> Mock {
        self.expect_embeddings(json!([values])).await
    }

    /// Answer `POST /v1/embed` with a raw `embeddings` array.
    pub async fn expect_embeddings(&mut self, embeddings: Value) -> Mock {
        let body = json!({
            "id": "test-embed",
            "texts": ["query"],
            "embeddings": embeddings,
            "meta": {"api_version": {"version": "1"}}
        });

        self.server
            .mock("POST", "/v1/embed")
            .match_header("authorization", format!("Bearer {}", TEST_API_KEY).as_str())
            .match_body(Matcher::PartialJson(json!({"input_type": "search_query"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Answer `POST /v1/embed` only after `delay`, to trip client timeouts.
    pub async fn expect_stall(&mut self, delay: Duration) -> Mock {
        self.server
            .mock("POST", "/v1/embed")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(move |w| {
                std::thread::sleep(delay);
                w.write_all(br#"{"embeddings": [[0.0]]}"#)
            })
            .create_async()
            .await
    }

    pub async fn expect_failure(&mut self, status: usize) -> Mock {
        self.server
            .mock("POST", "/v1/embed")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(json!({"message": "mock cohere failure"}).to_string())
            .create_async()
            .await
    }
}
