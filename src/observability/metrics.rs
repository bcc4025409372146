//! Metrics collection.
//!
//! # Metrics
//! - `httpkit_requests_total` (counter): completed calls by method, status
//! - `httpkit_request_duration_seconds` (histogram): end-to-end latency
//! - `httpkit_pool_transports` (gauge): cached transports
//! - `httpkit_pool_clients` (gauge): cached clients
//!
//! # Design Decisions
//! - Uses the `metrics` facade only; the embedding application installs an
//!   exporter if it wants one, otherwise every call is a no-op
//! - Failed calls are labelled `status="error"`

use std::time::Instant;

/// Record a finished request.
pub fn record_request(method: &str, status: Option<u16>, start: Instant) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());
    metrics::counter!(
        "httpkit_requests_total",
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("httpkit_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record the number of cached transports.
pub fn record_transport_count(count: usize) {
    metrics::gauge!("httpkit_pool_transports").set(count as f64);
}

/// Record the number of cached clients.
pub fn record_client_count(count: usize) {
    metrics::gauge!("httpkit_pool_clients").set(count as f64);
}
