//! Response handling.
//!
//! # Responsibilities
//! - Re-emit the upstream status and body unchanged
//! - Build the one locally synthesized error envelope
//!
//! # Design Decisions
//! - The upstream body is validated as JSON but never re-encoded
//! - GraphQL `errors` from the upstream are not inspected

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Message of the synthetic error returned when the upstream cannot be used.
pub const FORWARD_FAILURE_MESSAGE: &str = "Failed to forward request to backend";

/// `extensions.code` of the synthetic error.
pub const INTERNAL_SERVER_ERROR_CODE: &str = "INTERNAL_SERVER_ERROR";

/// An upstream answer, relayed as-is.
#[derive(Debug)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}

/// GraphQL-style error body: `{"errors":[...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphqlError {
    pub message: String,
    pub extensions: ErrorExtensions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorExtensions {
    pub code: String,
}

impl ErrorEnvelope {
    /// The envelope sent when the upstream is unreachable or unusable.
    pub fn forward_failure() -> Self {
        Self {
            errors: vec![GraphqlError {
                message: FORWARD_FAILURE_MESSAGE.to_string(),
                extensions: ErrorExtensions {
                    code: INTERNAL_SERVER_ERROR_CODE.to_string(),
                },
            }],
        }
    }
}
