//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define facade metrics (requests, latency, upstream calls, cache)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `facade_requests_total` (counter): requests by method, route, status
//! - `facade_request_duration_seconds` (histogram): latency distribution
//! - `upstream_calls_total` (counter): upstream calls by operation, outcome
//! - `upstream_retries_total` (counter): retries by operation
//! - `search_cache_lookups_total` (counter): cache lookups by result (hit/miss)
//! - `search_cache_invalidations_total` (counter): full cache clears
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   exporter every call is a no-op, so tests need no setup
//! - Labels are low-cardinality (matched route, not raw path)

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed facade request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let route = route.to_string();
    let status = status.to_string();
    metrics::counter!(
        "facade_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "facade_request_duration_seconds",
        "method" => method,
        "route" => route,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one upstream operation.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str) {
    metrics::counter!("upstream_calls_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

/// Record one retry of an upstream operation.
pub fn record_upstream_retry(operation: &'static str) {
    metrics::counter!("upstream_retries_total", "operation" => operation).increment(1);
}

/// Record a search cache lookup.
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!("search_cache_lookups_total", "result" => result).increment(1);
}

/// Record a full search cache invalidation.
pub fn record_cache_invalidation() {
    metrics::counter!("search_cache_invalidations_total").increment(1);
}
