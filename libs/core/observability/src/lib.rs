//! Observability utilities for the search gateway.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Search pipeline metrics (upstream latency, failures, result counts)
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, SearchMetrics};
//!
//! init_metrics()?;
//!
//! SearchMetrics::record_upstream("embedding", Duration::from_millis(120), true);
//!
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod search;

pub use middleware::metrics_middleware;
pub use search::SearchMetrics;

pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at startup; later calls return the existing handle.
///
/// # Errors
/// Fails if another global recorder was already installed.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Search metrics
    describe_counter!("search_requests_total", "Search requests by outcome");
    describe_histogram!(
        "search_upstream_duration_seconds",
        "Latency of upstream calls by stage (embedding, vector_store)"
    );
    describe_counter!(
        "search_upstream_errors_total",
        "Failed upstream calls by stage"
    );
    describe_histogram!(
        "search_fetched_matches",
        "Matches fetched from the vector store per request"
    );
}
