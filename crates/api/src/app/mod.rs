//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: the shared warehouse behind a single lock
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use warehouse_inventory::Warehouse;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around a fresh, empty warehouse.
pub fn build_app(config: ApiConfig) -> Router {
    build_app_with(Warehouse::new(), config)
}

/// Build the router around an existing warehouse (pre-seeded bins, tests).
pub fn build_app_with(warehouse: Warehouse, config: ApiConfig) -> Router {
    let cors = middleware::CorsState {
        allow_origin: config.cors_origin.clone(),
    };
    let services = Arc::new(services::WarehouseService::new(warehouse));

    routes::router()
        .layer(Extension(services))
        .layer(Extension(Arc::new(config)))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(axum::middleware::from_fn_with_state(
                    cors,
                    middleware::cors_middleware,
                )),
        )
}
