//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the relay and health handlers
//! - Wire up middleware (CORS, request counting, request ID, tracing,
//!   inbound deadline, body limit)
//! - Bind server to listener
//! - Apply configuration reloads to the live upstream
//! - Stop on the shutdown broadcast, draining in-flight requests

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::cors::cors_layer;
use crate::http::health::health_handler;
use crate::http::middleware::{request_deadline, track_requests, HEALTH_PATH, RELAY_PATH};
use crate::http::relay::relay_handler;
use crate::http::upstream::Upstream;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<ArcSwap<Upstream>>,
}

/// HTTP server for the GraphQL relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
    upstream: Arc<ArcSwap<Upstream>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let upstream = Arc::new(ArcSwap::from_pointee(Upstream::new(config.upstream.clone())?));

        let state = AppState {
            upstream: upstream.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            upstream,
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: `track_requests` sits outside the deadline
    /// and body limit so their rejections are counted too.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let deadline = Duration::from_secs(config.timeouts.request_secs);

        Router::new()
            .route(RELAY_PATH, post(relay_handler))
            .route(HEALTH_PATH, get(health_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(middleware::from_fn_with_state(deadline, request_deadline))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(middleware::from_fn(track_requests))
            .layer(cors_layer())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs received on `config_updates` replace the live upstream; the
    /// server stops when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RelayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.url,
            "HTTP server starting"
        );

        let upstream = self.upstream.clone();
        let startup_config = self.config.clone();
        let reloader = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                apply_reload(&upstream, &startup_config, new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the startup config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Swap in the upstream section of a reloaded config.
fn apply_reload(upstream: &ArcSwap<Upstream>, startup: &RelayConfig, new_config: RelayConfig) {
    if new_config.listener != startup.listener
        || new_config.timeouts != startup.timeouts
        || new_config.security != startup.security
        || new_config.observability != startup.observability
    {
        tracing::warn!("Only the [upstream] section is reloadable; other changes need a restart");
    }

    if upstream.load().config == new_config.upstream {
        tracing::debug!("Upstream settings unchanged");
        return;
    }

    match Upstream::new(new_config.upstream) {
        Ok(next) => {
            tracing::info!(
                upstream = %next.url(),
                timeout_secs = next.config.timeout_secs,
                "Upstream reconfigured"
            );
            upstream.store(Arc::new(next));
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build upstream client, keeping current upstream");
        }
    }
}
