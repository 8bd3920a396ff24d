use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::WarehouseService;
use crate::app::{dto, errors};

pub async fn get_bins_status(
    Extension(services): Extension<Arc<WarehouseService>>,
) -> axum::response::Response {
    match services.bin_status() {
        Ok(bins) => (StatusCode::OK, Json(dto::bins_to_json(&bins))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
