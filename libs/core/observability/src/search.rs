//! Metrics for the embed → query → paginate pipeline.

use metrics::{counter, histogram};
use std::time::Duration;

/// Search pipeline metrics recorder
pub struct SearchMetrics;

impl SearchMetrics {
    /// Record one upstream call (`stage` is `embedding` or `vector_store`).
    pub fn record_upstream(stage: &'static str, elapsed: Duration, success: bool) {
        histogram!("search_upstream_duration_seconds", "stage" => stage)
            .record(elapsed.as_secs_f64());

        if !success {
            counter!("search_upstream_errors_total", "stage" => stage).increment(1);
        }

        tracing::debug!(
            stage = stage,
            duration_ms = elapsed.as_millis() as u64,
            success = success,
            "Upstream call finished"
        );
    }

    /// Record how many matches the vector store returned for one request.
    pub fn record_fetched(matches: usize) {
        histogram!("search_fetched_matches").record(matches as f64);
    }

    /// Record the outcome of a whole search (`ok`, `unavailable`, `invalid`, `failed`).
    pub fn record_request(outcome: &'static str) {
        counter!("search_requests_total", "outcome" => outcome).increment(1);
    }
}
