//! A stand-in GraphQL backend for trying the relay locally.
//!
//! `cargo run --example mock_upstream`, then start the relay with its default
//! `BACKEND_URL` and point a front-end (or `relay-cli`) at it.

use axum::{http::HeaderMap, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;

async fn graphql(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let signed_in = headers.contains_key("authorization");
    Json(json!({
        "data": {
            "echo": body,
            "signedIn": signed_in,
            "categories": [],
        }
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = Router::new().route("/query", post(graphql));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    println!("Mock GraphQL upstream listening on http://{}/query", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
