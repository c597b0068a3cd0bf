//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: catalog wiring shared by every handler
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and wire-to-domain mapping
//! - `errors.rs`: the uniform error envelope

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use catalog_products::ProductCatalog;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router backed by a fresh in-memory registry.
pub fn build_app() -> Router {
    build_app_with(services::AppServices::in_memory())
}

/// Build the router over an explicit catalog implementation.
pub fn build_app_with_catalog(catalog: Arc<dyn ProductCatalog>) -> Router {
    build_app_with(services::AppServices::new(catalog))
}

fn build_app_with(services: services::AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(services)),
        )
}
