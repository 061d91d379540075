//! Cache header policy for CMS-backed responses.

use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::http::{HeaderMap, HeaderValue};

use crate::config::CacheConfig;

pub const NO_STORE: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// Shared-cache directive for the configured ages.
pub fn shared_cache_value(cache: &CacheConfig) -> String {
    format!(
        "public, s-maxage={}, stale-while-revalidate={}",
        cache.max_age_secs, cache.stale_while_revalidate_secs
    )
}

/// Headers for a response; `bypass` forces the no-store set.
pub fn cache_headers(cache: &CacheConfig, bypass: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if bypass || cache.development_mode {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(EXPIRES, HeaderValue::from_static("0"));
        return headers;
    }

    // Built only from integers, so always a valid header value.
    if let Ok(value) = HeaderValue::from_str(&shared_cache_value(cache)) {
        headers.insert(CACHE_CONTROL, value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_cache_uses_configured_ages() {
        let headers = cache_headers(&CacheConfig::default(), false);
        assert_eq!(
            headers.get(CACHE_CONTROL).unwrap(),
            "public, s-maxage=3600, stale-while-revalidate=86400"
        );
        assert!(headers.get(PRAGMA).is_none());
    }

    #[test]
    fn test_bypass_and_development_mode_disable_caching() {
        let headers = cache_headers(&CacheConfig::default(), true);
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), NO_STORE);
        assert_eq!(headers.get(PRAGMA).unwrap(), "no-cache");
        assert_eq!(headers.get(EXPIRES).unwrap(), "0");

        let dev = CacheConfig {
            development_mode: true,
            ..CacheConfig::default()
        };
        assert_eq!(cache_headers(&dev, false).get(CACHE_CONTROL).unwrap(), NO_STORE);
    }
}
