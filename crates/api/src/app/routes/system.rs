use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors;
use crate::app::services::WarehouseService;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "running",
        "message": "Warehouse API is running",
        "available_endpoints": [
            "/api/stock/status",
            "/api/stock/add",
            "/api/stock/dispatch",
            "/api/bins/status",
            "/api/warehouse/metrics",
        ],
    }))
}

pub async fn metrics(
    Extension(services): Extension<Arc<WarehouseService>>,
) -> axum::response::Response {
    match services.metrics() {
        Ok(m) => (StatusCode::OK, Json(m)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
