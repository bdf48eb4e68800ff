//! Per-request plumbing.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) and echo it on the response
//! - Record request count and latency per matched route
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Metrics are labelled by route template, never by raw path

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::observability::metrics;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer assigning a fresh `x-request-id` when the client sent none.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer copying the request's `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Middleware recording `facade_requests_total` and latency.
pub async fn record_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;

    metrics::record_request(&method, &route, response.status().as_u16(), start);
    response
}
