//! Shared upstream types and error definitions.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use crate::config::schema::UpstreamConfig;

/// Which upstream an error or metric refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    Cms,
    ClientApi,
}

impl Upstream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::Cms => "cms",
            Upstream::ClientApi => "client_api",
        }
    }
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while talking to an upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Client constructed without a base URL.
    #[error("{0} base URL is not configured")]
    NotConfigured(Upstream),

    /// Base URL present but unparseable.
    #[error("{upstream} base URL '{url}' is invalid: {reason}")]
    InvalidBaseUrl {
        upstream: Upstream,
        url: String,
        reason: String,
    },

    /// Bearer token cannot be sent as a header value.
    #[error("{0} API token is not a valid header value")]
    InvalidToken(Upstream),

    /// The reqwest client could not be built.
    #[error("failed to build {0} HTTP client")]
    ClientBuild(Upstream, #[source] reqwest::Error),

    /// Network, DNS, TLS or timeout failure.
    #[error("{0} request failed: {1}")]
    Transport(Upstream, #[source] reqwest::Error),

    /// The upstream answered 404.
    #[error("{upstream} resource not found: {resource}")]
    NotFound { upstream: Upstream, resource: String },

    /// Any other non-2xx answer.
    #[error("{upstream} returned {status}: {body}")]
    Status {
        upstream: Upstream,
        status: StatusCode,
        body: String,
    },

    /// The body did not match the expected contract.
    #[error("{0} response could not be decoded: {1}")]
    Decode(Upstream, String),
}

impl UpstreamError {
    pub fn upstream(&self) -> Upstream {
        match self {
            UpstreamError::NotConfigured(u)
            | UpstreamError::InvalidToken(u)
            | UpstreamError::ClientBuild(u, _)
            | UpstreamError::Transport(u, _)
            | UpstreamError::Decode(u, _) => *u,
            UpstreamError::InvalidBaseUrl { upstream, .. }
            | UpstreamError::NotFound { upstream, .. }
            | UpstreamError::Status { upstream, .. } => *upstream,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound { .. })
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Parse and normalize a configured base URL.
///
/// The path always ends with `/` so that `Url::join` appends instead of
/// replacing the last segment.
pub(crate) fn parse_base_url(upstream: Upstream, raw: &str) -> UpstreamResult<url::Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UpstreamError::NotConfigured(upstream));
    }

    let mut url = url::Url::parse(trimmed).map_err(|e| UpstreamError::InvalidBaseUrl {
        upstream,
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(UpstreamError::InvalidBaseUrl {
            upstream,
            url: trimmed.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Join a relative endpoint path onto a normalized base URL.
pub(crate) fn endpoint(upstream: Upstream, base: &url::Url, path: &str) -> UpstreamResult<url::Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| UpstreamError::InvalidBaseUrl {
            upstream,
            url: format!("{base}{path}"),
            reason: e.to_string(),
        })
}

/// Decode a finished reqwest response, mapping status and body failures.
pub(crate) async fn read_json<T: DeserializeOwned>(
    upstream: Upstream,
    resource: &str,
    response: reqwest::Response,
) -> UpstreamResult<T> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| UpstreamError::Transport(upstream, e))?;

    if status == StatusCode::NOT_FOUND {
        return Err(UpstreamError::NotFound {
            upstream,
            resource: resource.to_string(),
        });
    }
    if !status.is_success() {
        return Err(UpstreamError::Status {
            upstream,
            status,
            body: String::from_utf8_lossy(&body).chars().take(512).collect(),
        });
    }

    serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(upstream, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_base_url_is_not_configured() {
        let err = parse_base_url(Upstream::Cms, "   ").unwrap_err();
        assert!(matches!(err, UpstreamError::NotConfigured(Upstream::Cms)));
        assert_eq!(err.to_string(), "cms base URL is not configured");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = parse_base_url(Upstream::ClientApi, "not a url").unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidBaseUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url(Upstream::Cms, "http://cms.local/api").unwrap();
        assert_eq!(url.as_str(), "http://cms.local/api/");

        let joined = endpoint(Upstream::Cms, &url, "/seos").unwrap();
        assert_eq!(joined.as_str(), "http://cms.local/api/seos");
    }

    #[test]
    fn test_error_upstream_accessor() {
        let err = UpstreamError::NotFound {
            upstream: Upstream::ClientApi,
            resource: "course-details".to_string(),
        };
        assert_eq!(err.upstream(), Upstream::ClientApi);
        assert!(err.is_not_found());
    }
}
