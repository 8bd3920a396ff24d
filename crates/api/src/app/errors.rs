use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Value};

use warehouse_core::DomainError;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::LockPoisoned => {
            tracing::error!("warehouse lock poisoned");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal server error",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        DomainError::InsufficientCapacity { bin_id, requested, free } => json_error_with(
            StatusCode::BAD_REQUEST,
            "insufficient_capacity",
            message,
            json!({ "bin_id": bin_id.as_str(), "requested": requested, "free": free }),
        ),
        DomainError::InsufficientStock { item_id, requested, available } => json_error_with(
            StatusCode::BAD_REQUEST,
            "insufficient_stock",
            message,
            json!({ "item_id": item_id.as_str(), "requested": requested, "available": available }),
        ),
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    json_error_with(status, code, message, Value::Null)
}

/// Error body with extra fields merged in next to `status`/`error`/`message`.
pub fn json_error_with(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    details: Value,
) -> axum::response::Response {
    let mut body = json!({
        "status": "error",
        "error": code,
        "message": message.into(),
    });
    if let (Value::Object(body), Value::Object(details)) = (&mut body, details) {
        body.extend(details);
    }
    (status, axum::Json(body)).into_response()
}
