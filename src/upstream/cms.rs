//! Reqwest-backed headless CMS client.
//!
//! Owns transport details only: filter/populate query syntax, cache bypass
//! headers, auth, and error mapping into `UpstreamError`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;

use super::dto::CmsEnvelope;
use super::types::{endpoint, parse_base_url, read_json, Upstream, UpstreamError, UpstreamResult};
use super::ContentSource;
use crate::config::UpstreamConfig;
use crate::observability::metrics;

/// Comparison operator in a CMS filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Contains,
    ContainsI,
    In,
}

impl FilterOp {
    fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "$eq",
            FilterOp::Contains => "$contains",
            FilterOp::ContainsI => "$containsi",
            FilterOp::In => "$in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsFilter {
    /// Field path, e.g. `["institution", "slug"]`.
    pub path: Vec<String>,
    pub op: FilterOp,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Populate {
    #[default]
    None,
    All,
    Fields(Vec<String>),
}

/// Collection query, rendered into the CMS's bracketed query syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmsQuery {
    pub filters: Vec<CmsFilter>,
    pub populate: Populate,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Vec<String>,
}

impl CmsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, path: &[&str], op: FilterOp, value: impl Into<String>) -> Self {
        self.filters.push(CmsFilter {
            path: path.iter().map(|s| s.to_string()).collect(),
            op,
            values: vec![value.into()],
        });
        self
    }

    pub fn filter_in(mut self, path: &[&str], values: Vec<String>) -> Self {
        self.filters.push(CmsFilter {
            path: path.iter().map(|s| s.to_string()).collect(),
            op: FilterOp::In,
            values,
        });
        self
    }

    pub fn populate_all(mut self) -> Self {
        self.populate = Populate::All;
        self
    }

    pub fn populate(mut self, fields: &[&str]) -> Self {
        self.populate = Populate::Fields(fields.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn paginate(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn sort(mut self, field: &str, descending: bool) -> Self {
        let dir = if descending { "desc" } else { "asc" };
        self.sort.push(format!("{field}:{dir}"));
        self
    }

    /// Flatten into `(key, value)` pairs ready for `RequestBuilder::query`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for filter in &self.filters {
            let mut key = String::from("filters");
            for segment in &filter.path {
                key.push('[');
                key.push_str(segment);
                key.push(']');
            }
            key.push('[');
            key.push_str(filter.op.as_str());
            key.push(']');

            if filter.op == FilterOp::In {
                for (i, value) in filter.values.iter().enumerate() {
                    pairs.push((format!("{key}[{i}]"), value.clone()));
                }
            } else if let Some(value) = filter.values.first() {
                pairs.push((key, value.clone()));
            }
        }

        match &self.populate {
            Populate::None => {}
            Populate::All => pairs.push(("populate".to_string(), "*".to_string())),
            Populate::Fields(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    pairs.push((format!("populate[{i}]"), field.clone()));
                }
            }
        }

        if let Some(page) = self.page {
            pairs.push(("pagination[page]".to_string(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pagination[pageSize]".to_string(), size.to_string()));
        }

        for (i, sort) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{i}]"), sort.clone()));
        }

        pairs
    }
}

/// HTTP client for the CMS REST API.
#[derive(Clone)]
pub struct CmsClient {
    client: Client,
    base_url: url::Url,
}

impl CmsClient {
    /// Build a client from config. Fails immediately when the base URL is
    /// missing or invalid.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = parse_base_url(Upstream::Cms, &config.base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| UpstreamError::InvalidToken(Upstream::Cms))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| UpstreamError::ClientBuild(Upstream::Cms, e))?;

        tracing::info!(base_url = %base_url, "CMS client initialized");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn fetch(
        &self,
        collection: &str,
        query: &CmsQuery,
        no_cache: bool,
    ) -> UpstreamResult<CmsEnvelope<Value>> {
        let url = endpoint(Upstream::Cms, &self.base_url, collection)?;

        let mut request = self.client.get(url).query(&query.to_query_pairs());
        if no_cache {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        tracing::debug!(collection = %collection, no_cache, "Fetching CMS collection");

        let result = match request.send().await {
            Ok(response) => read_json(Upstream::Cms, collection, response).await,
            Err(e) => Err(UpstreamError::Transport(Upstream::Cms, e)),
        };
        metrics::record_upstream_call(Upstream::Cms, collection, &result);
        result
    }
}

impl std::fmt::Debug for CmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
