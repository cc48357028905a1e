//! Router-wide middleware.
//!
//! # Responsibilities
//! - Enforce the inbound deadline (`timeouts.request_secs`)
//! - Count every response, including ones produced by rejecting layers

use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::error::RelayError;
use crate::http::request::request_id;
use crate::observability::metrics;

pub const RELAY_PATH: &str = "/query";
pub const HEALTH_PATH: &str = "/health";

/// Metrics label for a request path.
pub fn endpoint_label(path: &str) -> &'static str {
    match path {
        RELAY_PATH => "query",
        HEALTH_PATH => "health",
        _ => "other",
    }
}

/// Cut the request off after `deadline`.
///
/// On the relay path an expired deadline is an upstream failure like any
/// other and gets the 500 envelope; elsewhere it is a plain 408.
pub async fn request_deadline(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let is_relay = request.uri().path() == RELAY_PATH;
    let request_id = request_id(request.headers());

    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                request_id = %request_id,
                deadline_secs = deadline.as_secs(),
                "Request deadline expired"
            );
            if is_relay {
                metrics::record_upstream_failure(RelayError::Timeout.kind());
                RelayError::Timeout.into_response()
            } else {
                StatusCode::REQUEST_TIMEOUT.into_response()
            }
        }
    }
}

/// Record `relay_requests_total` and latency for every response.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let endpoint = endpoint_label(request.uri().path());

    let response = next.run(request).await;
    metrics::record_request(endpoint, response.status().as_u16(), start_time);
    response
}
