//! Relay failure taxonomy.
//!
//! Every variant is terminal for its request and maps to the same 500
//! envelope; the variant only shows up in logs and metrics.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::http::response::ErrorEnvelope;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The upstream did not answer within `upstream.timeout_secs`.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection refused, reset, DNS failure and the like.
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream answered with something that is not JSON.
    #[error("upstream returned a non-JSON body: {0}")]
    InvalidUpstreamBody(#[source] serde_json::Error),
}

impl RelayError {
    /// Short label used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Timeout => "timeout",
            RelayError::Transport(_) => "transport",
            RelayError::InvalidUpstreamBody(_) => "invalid_body",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::Transport(e)
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorEnvelope::forward_failure())).into_response()
    }
}
