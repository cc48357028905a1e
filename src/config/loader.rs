//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Upstream GraphQL endpoint URL.
pub const ENV_BACKEND_URL: &str = "BACKEND_URL";
/// Listen port.
pub const ENV_PORT: &str = "PORT";
/// Outbound deadline in seconds.
pub const ENV_UPSTREAM_TIMEOUT: &str = "UPSTREAM_TIMEOUT_SECS";
/// Path to an optional TOML config file.
pub const ENV_CONFIG_PATH: &str = "RELAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: `{value}`")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the optional TOML file, then the
/// process environment. The result is validated.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` resolves a variable name; production passes `std::env::var`.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BACKEND_URL) {
        config.upstream.url = url;
    }

    if let Some(port) = lookup(ENV_PORT) {
        config.listener.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { name: ENV_PORT, value: port })?;
    }

    if let Some(secs) = lookup(ENV_UPSTREAM_TIMEOUT) {
        config.upstream.timeout_secs = secs
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { name: ENV_UPSTREAM_TIMEOUT, value: secs })?;
    }

    Ok(())
}
