//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → environment overrides: BACKEND_URL, PORT, UPSTREAM_TIMEOUT_SECS
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps its live UpstreamConfig
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the relay runs with no file at all
//! - Only the upstream section is reloadable; listener and CORS are fixed
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig, SecurityConfig, TimeoutConfig,
    UpstreamConfig,
};
