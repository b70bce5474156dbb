use axum_helpers::{ErrorResponse, HealthResponse, InfoResponse};
use domain_search::SearchApiDoc;
use utoipa::OpenApi;

/// Service metadata endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        axum_helpers::server::health::info_handler,
        axum_helpers::server::health::health_handler,
    ),
    components(
        schemas(ErrorResponse, HealthResponse, InfoResponse)
    ),
    info(
        title = "CiteCrawler API",
        version = "1.0.0",
        description = "Semantic search over research papers"
    ),
    tags(
        (name = "meta", description = "Service info and liveness")
    )
)]
struct MetaApiDoc;

/// Full document served at `/openapi.json`
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = MetaApiDoc::openapi();
        doc.merge(SearchApiDoc::openapi());
        doc
    }
}
