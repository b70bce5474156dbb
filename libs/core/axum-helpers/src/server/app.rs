use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::cors_layer_from_env;
use axum::Router;
use core_config::server::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

/// Path the OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Starts the Axum server and shuts down gracefully on SIGINT/SIGTERM.
///
/// # Errors
/// Returns an error if the listener cannot bind to the configured address
/// or the server fails while running.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use core_config::server::ServerConfig;
/// use axum_helpers::server::create_app;
///
/// #[tokio::main]
/// async fn main() -> std::io::Result<()> {
///     create_app(Router::new(), &ServerConfig::default()).await
/// }
/// ```
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Wraps the application routes with documentation and cross-cutting layers.
///
/// Adds:
/// - OpenAPI document at `/openapi.json`, Swagger UI at `/docs`, ReDoc at `/redoc`
/// - JSON 404 fallback
/// - request tracing, CORS (see [`cors_layer_from_env`]) and response compression
///
/// Routes are mounted at the root; there is no `/api` prefix.
///
/// # Errors
/// Returns an error if `CORS_ALLOWED_ORIGIN` holds an invalid origin.
pub fn create_router<T>(routes: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = cors_layer_from_env()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/docs").url(OPENAPI_PATH, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}
