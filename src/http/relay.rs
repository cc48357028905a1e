//! `POST /query`: the authenticated GraphQL relay.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};

use crate::http::request::{outbound_body, request_id};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Relay one GraphQL request to the upstream.
pub async fn relay_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = request_id(&headers);
    let authorization = headers.get(header::AUTHORIZATION).cloned();

    // Presence only, never the token itself.
    tracing::info!(
        request_id = %request_id,
        has_authorization = authorization.is_some(),
        "Relaying GraphQL request"
    );
    metrics::record_authorization(authorization.is_some());

    let upstream = state.upstream.load_full();
    match upstream.forward(authorization, outbound_body(body)).await {
        Ok(relayed) => {
            tracing::debug!(
                request_id = %request_id,
                status = %relayed.status,
                "Upstream responded"
            );
            relayed.into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = %upstream.url(),
                error = %e,
                "Failed to forward request to backend"
            );
            metrics::record_upstream_failure(e.kind());
            e.into_response()
        }
    }
}
