//! Shared utilities for integration testing: a recording mock upstream and a
//! relay running on an ephemeral port.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use graphql_relay::config::RelayConfig;
use graphql_relay::http::HttpServer;
use graphql_relay::lifecycle::Shutdown;

/// One request as the upstream saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub authorization: Vec<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Captured>>>);

impl Recorder {
    fn push(&self, captured: Captured) {
        self.0.lock().unwrap().push(captured);
    }

    pub fn all(&self) -> Vec<Captured> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn last(&self) -> Captured {
        self.all().pop().expect("upstream received no request")
    }
}

/// Start a programmable upstream on `127.0.0.1:0` serving `POST /query`.
///
/// `f` decides the status and raw body of every reply.
pub async fn start_upstream<F, Fut>(f: F) -> (String, Recorder)
where
    F: Fn() -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorder = Recorder::default();

    let rec = recorder.clone();
    let app = Router::new().route(
        "/query",
        post(move |headers: HeaderMap, body: Bytes| {
            let rec = rec.clone();
            let f = f.clone();
            async move {
                rec.push(Captured {
                    authorization: headers
                        .get_all(header::AUTHORIZATION)
                        .iter()
                        .map(|v| v.to_str().unwrap().to_string())
                        .collect(),
                    content_type: headers
                        .get(header::CONTENT_TYPE)
                        .map(|v| v.to_str().unwrap().to_string()),
                    body: body.to_vec(),
                });
                let (status, body) = f().await;
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
            }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/query", addr), recorder)
}

/// An upstream that always answers with the same status and body.
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> (String, Recorder) {
    start_upstream(move || async move { (status, body.to_string()) }).await
}

/// A URL nothing is listening on.
pub async fn unreachable_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/query", addr)
}

pub struct RunningRelay {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<RelayConfig>,
}

impl RunningRelay {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn config_for(upstream_url: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.upstream.url = upstream_url.to_string();
    config
}

pub async fn start_relay(upstream_url: &str) -> RunningRelay {
    start_relay_with(config_for(upstream_url)).await
}

pub async fn start_relay_with(config: RelayConfig) -> RunningRelay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    RunningRelay { addr, shutdown, updates }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
