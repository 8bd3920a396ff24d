use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

#[derive(Clone)]
pub struct CorsState {
    pub allow_origin: HeaderValue,
}

/// Browser access for the dashboard: CORS headers on every response, and
/// preflight `OPTIONS` requests answered here without reaching a handler.
pub async fn cors_middleware(
    State(state): State<CorsState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let mut res = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    apply_cors_headers(res.headers_mut(), &state);
    res
}

fn apply_cors_headers(headers: &mut HeaderMap, state: &CorsState) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, state.allow_origin.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
}

/// One log line per request: method, path, status and latency.
pub async fn trace_requests(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let res = next.run(req).await;

    let status = res.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if res.status().is_server_error() {
        tracing::error!(%method, %path, status, elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status, elapsed_ms, "request handled");
    }

    res
}
