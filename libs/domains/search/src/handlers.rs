use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    ValidatedQuery,
    errors::responses::{
        InternalServerErrorResponse, ServiceUnavailableResponse, ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{
    error::SearchResult,
    models::{SearchHit, SearchPage, SearchParams},
    repository::VectorStore,
    service::SearchService,
};

/// OpenAPI documentation for the search endpoint
#[derive(OpenApi)]
#[openapi(
    paths(search),
    components(
        schemas(SearchPage, SearchHit),
        responses(
            ValidationErrorResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "search", description = "Semantic paper search")
    )
)]
pub struct ApiDoc;

/// Create Axum router for the search endpoint
pub fn router<S>(service: Arc<SearchService<S>>) -> Router
where
    S: VectorStore + 'static,
{
    Router::new()
        .route("/search", get(search::<S>))
        .with_state(service)
}

/// Semantic search over indexed papers
///
/// Embeds `q`, fetches the nearest papers and returns page `page` of size `top_k`.
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matching papers", body = SearchPage),
        (status = 422, response = ValidationErrorResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search<S>(
    State(service): State<Arc<SearchService<S>>>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> SearchResult<Json<SearchPage>>
where
    S: VectorStore,
{
    let page = service.search(&params.q, params.top_k, params.page).await?;
    Ok(Json(page))
}
