//! `GET /health`: liveness of the relay itself.
//!
//! Never calls the upstream; it only reports which upstream is configured.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub backend: String,
    pub timestamp: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    let upstream = state.upstream.load();

    Json(HealthStatus {
        status: "ok".to_string(),
        backend: upstream.url().to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
