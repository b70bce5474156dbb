//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with OpenAPI documentation and common layers
//! - Info, health and readiness endpoints
//! - Graceful shutdown
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::server::ServerConfig;
//!
//! let routes = api_routes.merge(health_router());
//! let router = create_router::<ApiDoc>(routes)?;
//! create_app(router, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_PATH, create_app, create_router};
pub use health::{
    HealthCheckFuture, HealthResponse, InfoResponse, health_router, info_router,
    run_health_checks,
};
pub use shutdown::shutdown_signal;
