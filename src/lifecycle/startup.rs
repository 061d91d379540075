//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Upstream clients are built before the listener binds

use std::sync::Arc;

use thiserror::Error;

use crate::config::BffConfig;
use crate::http::AppState;
use crate::upstream::{ClientApiClient, CmsClient, UpstreamError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the shared handler state from validated config.
pub fn build_state(config: &BffConfig) -> Result<AppState, StartupError> {
    let cms = CmsClient::new(&config.cms)?;
    let catalog = ClientApiClient::new(&config.client_api)?;

    tracing::info!(
        cms = %cms.base_url(),
        client_api = %catalog.base_url(),
        development_mode = config.cache.development_mode,
        "Upstream clients ready"
    );

    Ok(AppState::new(
        Arc::new(cms),
        Arc::new(catalog),
        config.cache.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_unconfigured_upstream_fails_fast() {
        let config = BffConfig::default();
        assert_matches!(
            build_state(&config).err(),
            Some(StartupError::Upstream(UpstreamError::NotConfigured(_)))
        );
    }

    #[test]
    fn test_build_state_with_configured_upstreams() {
        let mut config = BffConfig::default();
        config.cms.base_url = "http://cms.local/api".to_string();
        config.client_api.base_url = "http://catalog.local".to_string();
        assert!(build_state(&config).is_ok());
    }
}
