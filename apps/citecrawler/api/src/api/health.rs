//! Readiness check reporting whether each upstream is configured.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Readiness check endpoint.
///
/// 503 while either API key is missing, since every search would fail.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let search = &state.search;

    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "embedding",
            Box::pin(async {
                search
                    .embedding_configured()
                    .then_some(())
                    .ok_or_else(|| "COHERE_API_KEY not set".to_string())
            }),
        ),
        (
            "vector_store",
            Box::pin(async {
                search
                    .store_configured()
                    .then_some(())
                    .ok_or_else(|| "PINECONE_API_KEY not set".to_string())
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
