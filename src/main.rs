//! GraphQL auth-token relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 GRAPHQL RELAY                │
//!     Browser            │  ┌────────┐   ┌───────────┐   ┌──────────┐   │
//!     POST /query ───────┼─▶│  CORS  │──▶│ request id│──▶│  relay   │───┼──▶ Upstream
//!     Authorization?     │  │        │   │ + tracing │   │ handler  │   │    GraphQL
//!                        │  └────────┘   └───────────┘   └────┬─────┘   │
//!     status + body ◀────┼────────────────────────────────────┘         │
//!     (verbatim, or 500) │                                              │
//!                        │  config (file + env, hot reload)             │
//!                        │  observability (logs, metrics)               │
//!                        │  lifecycle (signals, graceful shutdown)      │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use graphql_relay::config::loader::ENV_CONFIG_PATH;
use graphql_relay::lifecycle::startup;

#[derive(Parser)]
#[command(name = "graphql-relay", version)]
#[command(about = "Relays GraphQL requests to the storefront backend, forwarding bearer tokens")]
struct Args {
    /// Optional TOML config file; watched for changes.
    #[arg(short, long, env = ENV_CONFIG_PATH)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    startup::run(args.config).await
}
