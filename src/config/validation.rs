//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Both upstream base URLs present and parseable
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BffConfig → Result<(), Vec<ValidationError>>
//! - Runs before any client is constructed

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{BffConfig, UpstreamConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} '{value}' is not a valid URL: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

pub fn validate_config(config: &BffConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_upstream(&config.cms, "cms.base_url", "cms.timeout_secs", &mut errors);
    validate_upstream(
        &config.client_api,
        "client_api.base_url",
        "client_api.timeout_secs",
        &mut errors,
    );

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "timeouts.request_secs",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream(
    upstream: &UpstreamConfig,
    url_field: &'static str,
    timeout_field: &'static str,
    errors: &mut Vec<ValidationError>,
) {
    let base_url = upstream.base_url.trim();
    if base_url.is_empty() {
        errors.push(ValidationError::Missing { field: url_field });
    } else if let Err(e) = url::Url::parse(base_url) {
        errors.push(ValidationError::InvalidUrl {
            field: url_field,
            value: base_url.to_string(),
            reason: e.to_string(),
        });
    }

    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: timeout_field,
        });
    }
}
