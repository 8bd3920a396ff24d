use axum::{
    routing::{get, post},
    Router,
};

pub mod bins;
pub mod stock;
pub mod system;

/// Every route the API serves.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health))
        .route("/api/stock/status", get(stock::get_stock_status))
        .route("/api/stock/add", post(stock::add_stock))
        .route("/api/stock/dispatch", post(stock::dispatch_stock))
        .route("/api/bins/status", get(bins::get_bins_status))
        .route("/api/warehouse/metrics", get(system::metrics))
}
