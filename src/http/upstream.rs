//! Outbound exchange with the upstream GraphQL service.
//!
//! # Responsibilities
//! - Hold the live upstream settings together with the HTTP client built for them
//! - Send exactly one POST per relayed request, with a bounded deadline
//! - Forward the inbound `Authorization` value untouched, or nothing at all

use std::time::Duration;

use axum::{
    body::Bytes,
    http::{header, HeaderValue},
};
use serde_json::value::RawValue;

use crate::config::UpstreamConfig;
use crate::http::error::RelayError;
use crate::http::response::RelayedResponse;

/// Upstream settings plus the connection pool configured for them.
///
/// Swapped as a unit when the configuration is reloaded.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub config: UpstreamConfig,
    client: reqwest::Client,
}

impl Upstream {
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// POST `body` to the upstream and hand back its status and JSON body.
    ///
    /// No retries: any transport failure is returned to the caller.
    pub async fn forward(
        &self,
        authorization: Option<HeaderValue>,
        body: Bytes,
    ) -> Result<RelayedResponse, RelayError> {
        let mut request = self
            .client
            .post(&self.config.url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body);

        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        serde_json::from_slice::<&RawValue>(&body).map_err(RelayError::InvalidUpstreamBody)?;

        Ok(RelayedResponse { status, body })
    }
}
