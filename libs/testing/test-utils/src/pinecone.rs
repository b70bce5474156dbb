use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};

use crate::TEST_API_KEY;

/// Local stand-in for both Pinecone planes.
///
/// The describe-index response points the data plane back at this same
/// server, so one instance serves `/indexes/{name}` and `/query`.
pub struct MockPinecone {
    server: ServerGuard,
}

impl MockPinecone {
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub async fn expect_describe(&mut self, index_name: &str) -> Mock {
        let body = json!({
            "name": index_name,
            "dimension": 384,
            "metric": "cosine",
            "host": self.url(),
            "status": {"ready": true, "state": "Ready"}
        });

        self.server
            .mock("GET", format!("/indexes/{}", index_name).as_str())
            .match_header("api-key", TEST_API_KEY)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    pub async fn expect_missing_index(&mut self, index_name: &str) -> Mock {
        self.server
            .mock("GET", format!("/indexes/{}", index_name).as_str())
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(json!({"error": {"code": "NOT_FOUND"}}).to_string())
            .create_async()
            .await
    }

    /// Answer `POST /query` with `matches`, only when the request asks for
    /// `top_k` results with metadata.
    pub async fn expect_query(&mut self, top_k: u32, matches: Value) -> Mock {
        let body = json!({"matches": matches, "namespace": ""});

        self.server
            .mock("POST", "/query")
            .match_header("api-key", TEST_API_KEY)
            .match_body(Matcher::PartialJson(json!({
                "topK": top_k,
                "includeMetadata": true,
                "includeValues": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    pub async fn expect_query_failure(&mut self, status: usize) -> Mock {
        self.server
            .mock("POST", "/query")
            .with_status(status)
            .with_body("upstream unavailable")
            .create_async()
            .await
    }
}
