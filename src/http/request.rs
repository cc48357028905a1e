//! Inbound request handling.
//!
//! # Responsibilities
//! - Extract the GraphQL `query` and `variables` from the inbound body
//! - Re-serialize them for the upstream without touching their contents
//! - Read the request ID assigned by the request-ID layer
//!
//! # Design Decisions
//! - Fields are kept as raw JSON fragments, so number formatting, key order
//!   and whitespace inside them reach the upstream byte for byte
//! - No validation: a body that is not a JSON object is forwarded verbatim
//!   and the upstream decides what to do with it

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::value::RawValue;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The part of a GraphQL request the relay passes upstream.
#[derive(Debug, Serialize)]
pub struct RelayPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Box<RawValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Box<RawValue>>,
}

impl RelayPayload {
    /// Pick `query` and `variables` out of a JSON object body.
    ///
    /// Returns `None` when the body is not a JSON object.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let mut fields: HashMap<String, Box<RawValue>> = serde_json::from_slice(body).ok()?;
        Some(Self {
            query: fields.remove("query"),
            variables: fields.remove("variables"),
        })
    }
}

/// Build the outbound body from the inbound one.
pub fn outbound_body(inbound: Bytes) -> Bytes {
    match RelayPayload::from_body(&inbound) {
        Some(payload) => match serde_json::to_vec(&payload) {
            Ok(encoded) => Bytes::from(encoded),
            Err(_) => inbound,
        },
        None => inbound,
    }
}

/// The request ID set by `SetRequestIdLayer`, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
