use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

/// Liveness payload for `GET /health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Service banner for `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InfoResponse {
    pub message: String,
    pub version: String,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs multiple health checks concurrently and returns aggregated results.
///
/// The body is `{"status": "ready" | "not ready", "<name>": "up" | "down", ...}`.
/// Any failed check turns the response into a 503.
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
///     ("embedding", Box::pin(async { Ok(()) })),
///     ("vector_store", Box::pin(async { Err("PINECONE_API_KEY not set".into()) })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut status_map = BTreeMap::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(_) => {
                status_map.insert(name, "up");
            }
            Err(e) => {
                tracing::warn!("Readiness check failed: {} error: {}", name, e);
                status_map.insert(name, "down");
                all_healthy = false;
            }
        }
    }

    let mut response = json!({
        "status": if all_healthy { "ready" } else { "not ready" }
    });

    if let Value::Object(ref mut map) = response {
        for (name, status) in status_map {
            map.insert(name.to_string(), json!(status));
        }
    }

    if all_healthy {
        Ok((StatusCode::OK, Json(response)))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Health check endpoint handler.
///
/// Always 200 while the process is serving.
#[utoipa::path(
    get,
    path = "/health",
    tag = "meta",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health_handler() -> Response {
    let response = HealthResponse {
        status: "healthy".to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Service banner with a fixed message and the binary's version.
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses((status = 200, description = "Service banner", body = InfoResponse))
)]
pub async fn info_handler(State((message, app)): State<(&'static str, AppInfo)>) -> Response {
    let response = InfoResponse {
        message: message.to_string(),
        version: app.version.to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Creates a router with the `/health` endpoint.
pub fn health_router() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Creates a router serving `GET /` with `{message, version}`.
///
/// # Example
/// ```ignore
/// use core_config::app_info;
///
/// let app = Router::new()
///     .merge(info_router("CiteCrawler API", app_info!()))
///     .merge(health_router());
/// ```
pub fn info_router(message: &'static str, app_info: AppInfo) -> Router {
    Router::new()
        .route("/", get(info_handler))
        .with_state((message, app_info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let response = health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_info_reports_message_and_version() {
        let info = AppInfo {
            name: "citecrawler_api",
            version: "1.0.0",
        };
        let response = info_router("CiteCrawler API", info)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"message": "CiteCrawler API", "version": "1.0.0"})
        );
    }

    #[tokio::test]
    async fn test_run_health_checks_all_up() {
        let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
            ("embedding", Box::pin(async { Ok(()) })),
            ("vector_store", Box::pin(async { Ok(()) })),
        ];
        let (status, Json(body)) = run_health_checks(checks).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["vector_store"], "up");
    }

    #[tokio::test]
    async fn test_run_health_checks_one_down() {
        let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
            ("embedding", Box::pin(async { Err("COHERE_API_KEY not set".to_string()) })),
            ("vector_store", Box::pin(async { Ok(()) })),
        ];
        let (status, Json(body)) = run_health_checks(checks).await.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["embedding"], "down");
    }
}
