//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::BffConfig;
use crate::config::validation::{validate_config, ValidationError};

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
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<BffConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => BffConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto a loaded config.
///
/// | Env Var               | Field                          |
/// |-----------------------|--------------------------------|
/// | `BFF_BIND_ADDRESS`    | `listener.bind_address`        |
/// | `CMS_BASE_URL`        | `cms.base_url`                 |
/// | `CMS_API_TOKEN`       | `cms.api_token`                |
/// | `CLIENT_API_BASE_URL` | `client_api.base_url`          |
/// | `CLIENT_API_TOKEN`    | `client_api.api_token`         |
/// | `BFF_ENV`             | `cache.development_mode`       |
/// | `BFF_LOG_FORMAT`      | `observability.log_format`     |
pub fn apply_env_overrides<F>(config: &mut BffConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("BFF_BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = get("CMS_BASE_URL") {
        config.cms.base_url = v;
    }
    if let Some(v) = get("CMS_API_TOKEN") {
        config.cms.api_token = Some(v);
    }
    if let Some(v) = get("CLIENT_API_BASE_URL") {
        config.client_api.base_url = v;
    }
    if let Some(v) = get("CLIENT_API_TOKEN") {
        config.client_api.api_token = Some(v);
    }
    if let Some(v) = get("BFF_ENV") {
        config.cache.development_mode = v.eq_ignore_ascii_case("development");
    }
    if let Some(v) = get("BFF_LOG_FORMAT") {
        match v.to_ascii_lowercase().as_str() {
            "json" => config.observability.log_format = super::schema::LogFormat::Json,
            "pretty" => config.observability.log_format = super::schema::LogFormat::Pretty,
            other => tracing::warn!(value = %other, "Ignoring unknown BFF_LOG_FORMAT"),
        }
    }
}
