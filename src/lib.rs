//! GraphQL auth-token relay.
//!
//! Forwards browser GraphQL requests to a single upstream service, passing the
//! caller's `Authorization` header through untouched and mirroring the
//! upstream's status and body.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
