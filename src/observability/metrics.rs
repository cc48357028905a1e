//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by endpoint, status
//! - `relay_request_duration_seconds` (histogram): latency distribution
//! - `relay_upstream_failures_total` (counter): transport failures by kind
//! - `relay_authorized_requests_total` (counter): whether a bearer token was present
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics recorder"),
    }
}

pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    counter!(
        "relay_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("relay_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_failure(kind: &'static str) {
    counter!("relay_upstream_failures_total", "kind" => kind).increment(1);
}

pub fn record_authorization(present: bool) {
    let present = if present { "true" } else { "false" };
    counter!("relay_authorized_requests_total", "present" => present).increment(1);
}
