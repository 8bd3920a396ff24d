use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::app::services::WarehouseService;
use crate::app::{dto, errors};
use crate::config::ApiConfig;

pub async fn get_stock_status(
    Extension(services): Extension<Arc<WarehouseService>>,
) -> axum::response::Response {
    match services.stock_status() {
        Ok(stock) => (StatusCode::OK, Json(dto::stock_to_json(&stock))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_stock(
    Extension(services): Extension<Arc<WarehouseService>>,
    Extension(config): Extension<Arc<ApiConfig>>,
    body: Result<Json<dto::AddStockRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let cmd = match body.into_command(&config) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.add_stock(cmd, Utc::now()) {
        Ok(bins) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Stock added successfully",
                "bin_status": dto::bins_to_json(&bins),
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn dispatch_stock(
    Extension(services): Extension<Arc<WarehouseService>>,
    body: Result<Json<dto::DispatchStockRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let cmd = match body.into_command() {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.dispatch_stock(cmd) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": format!("Dispatched {} units", outcome.dispatched),
                "dispatched": outcome.dispatched,
                "stock_status": dto::stock_to_json(&outcome.stock),
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
