use axum::{Router, middleware, routing::get};
use axum_helpers::{create_router, health_router, info_router};
use observability::{metrics_handler, metrics_middleware};

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;

/// Banner message for `GET /`
pub const API_MESSAGE: &str = "CiteCrawler API";

/// Creates all application routes, mounted at the root.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(info_router(API_MESSAGE, state.config.app))
        .merge(health_router())
        .merge(domain_search::handlers::router(state.search.clone()))
        .merge(ready_router(state.clone()))
        .route("/metrics", get(metrics_handler))
}

/// Full application router: routes, docs, fallback and middleware.
///
/// Metrics are layered last so they also see requests that hit the 404 fallback.
pub fn build_router(state: &AppState) -> std::io::Result<Router> {
    Ok(create_router::<ApiDoc>(routes(state))?.layer(middleware::from_fn(metrics_middleware)))
}

/// Creates a router with the /ready endpoint.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use domain_search::{CohereConfig, PineconeConfig};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use test_utils::{MockCohere, MockPinecone, TEST_API_KEY, TEST_INDEX, TestDataBuilder};
    use tower::ServiceExt;

    fn config(cohere: CohereConfig, pinecone: PineconeConfig) -> Config {
        Config {
            app: app_info!(),
            server: ServerConfig::default(),
            environment: Environment::Development,
            cohere,
            pinecone,
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn unconfigured_app() -> Router {
        let state = AppState::build(config(CohereConfig::default(), PineconeConfig::default()))
            .await
            .unwrap();
        routes(&state)
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (status, body) = get(unconfigured_app().await, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "CiteCrawler API", "version": "1.0.0"}));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(unconfigured_app().await, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_search_without_keys_is_503_and_not_ready() {
        let app = unconfigured_app().await;

        let (status, _) = get(app.clone(), "/search?q=transformers").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = get(app, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["embedding"], "down");
        assert_eq!(body["vector_store"], "down");
    }

    #[tokio::test]
    async fn test_search_end_to_end() {
        let mut cohere = MockCohere::start().await;
        let mut pinecone = MockPinecone::start().await;
        let builder = TestDataBuilder::from_test_name("app_search_end_to_end");

        let _describe = pinecone.expect_describe(TEST_INDEX).await;
        let _embed = cohere.expect_embedding(&[0.25, 0.5]).await;
        let _query = pinecone
            .expect_query(5, builder.matches(&[0.91, 0.88, 0.85, 0.80, 0.77]))
            .await;

        let state = AppState::build(config(
            CohereConfig::new(TEST_API_KEY).with_base_url(cohere.url()),
            PineconeConfig::new(TEST_API_KEY)
                .with_index_name(TEST_INDEX)
                .with_control_url(pinecone.url()),
        ))
        .await
        .unwrap();
        let app = routes(&state);

        let (status, body) = get(app.clone(), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");

        let (status, body) = get(app, "/search?q=transformers&top_k=5&page=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        assert_eq!(body["page"], 1);
        assert_eq!(body["results"][4]["score"], 0.77);
    }

    #[tokio::test]
    async fn test_startup_fails_for_unknown_index() {
        let mut pinecone = MockPinecone::start().await;
        let _missing = pinecone.expect_missing_index("ghost").await;

        let result = AppState::build(config(
            CohereConfig::default(),
            PineconeConfig::new(TEST_API_KEY)
                .with_index_name("ghost")
                .with_control_url(pinecone.url()),
        ))
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let state = AppState::build(config(CohereConfig::default(), PineconeConfig::default()))
            .await
            .unwrap();
        let app = build_router(&state).unwrap();

        let (status, body) = get(app, "/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "CiteCrawler API");
        assert!(body["paths"]["/search"].is_object());
        assert!(body["paths"]["/health"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let state = AppState::build(config(CohereConfig::default(), PineconeConfig::default()))
            .await
            .unwrap();
        let app = build_router(&state).unwrap();

        let (status, body) = get(app, "/papers/unknown").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
