//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → cors.rs (preflight, allow-list)
//!     → middleware.rs (request counting, inbound deadline)
//!     → relay.rs / health.rs (handlers)
//!     → request.rs (extract query + variables, request ID)
//!     → upstream.rs (one POST to the upstream, bounded deadline)
//!     → response.rs / error.rs (relay verbatim, or the 500 envelope)
//!     → Send to client
//! ```

pub mod cors;
pub mod error;
pub mod health;
pub mod middleware;
pub mod relay;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use error::RelayError;
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
