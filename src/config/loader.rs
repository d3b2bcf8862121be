//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ShimConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables recognized at startup. Values here override the file.
pub const ENV_UPSTREAM_DOMAIN: &str = "UPSTREAM_DOMAIN";
pub const ENV_PATH_PREFIX: &str = "PATH_PREFIX";
pub const ENV_UPSTREAM_SCHEME: &str = "UPSTREAM_SCHEME";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then environment overrides,
/// then semantic validation.
pub fn load_config(path: Option<&Path>) -> Result<ShimConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ShimConfig::default(),
    };

    apply_env(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env(config: &mut ShimConfig) {
    if let Ok(domain) = std::env::var(ENV_UPSTREAM_DOMAIN) {
        config.upstream.domain = domain;
    }
    if let Ok(prefix) = std::env::var(ENV_PATH_PREFIX) {
        config.upstream.path_prefix = prefix;
    }
    if let Ok(scheme) = std::env::var(ENV_UPSTREAM_SCHEME) {
        config.upstream.scheme = scheme;
    }
    if let Ok(addr) = std::env::var(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
}
