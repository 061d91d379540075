//! Reqwest-backed pricing/enrollment ("client API") client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::dto::{AutocompletePageDto, CatalogCourseDetailsDto, CoursesPageDto, UnitsByCourseDto};
use super::types::{endpoint, parse_base_url, read_json, Upstream, UpstreamError, UpstreamResult};
use super::CatalogSource;
use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::query::{AutocompleteKind, CoursesQueryParams, EnrichmentKey, UnitsByCourseQuery};

/// HTTP client for the pricing service.
#[derive(Clone)]
pub struct ClientApiClient {
    client: Client,
    base_url: url::Url,
}

impl ClientApiClient {
    /// Build a client from config. Fails immediately when the base URL is
    /// missing or invalid.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = parse_base_url(Upstream::ClientApi, &config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| UpstreamError::InvalidToken(Upstream::ClientApi))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| UpstreamError::ClientBuild(Upstream::ClientApi, e))?;

        tracing::info!(base_url = %base_url, "Client API initialized");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> UpstreamResult<T> {
        let url = endpoint(Upstream::ClientApi, &self.base_url, path)?;
        tracing::debug!(path = %path, "Calling client API");

        let result = match self.client.get(url).query(query).send().await {
            Ok(response) => read_json(Upstream::ClientApi, path, response).await,
            Err(e) => Err(UpstreamError::Transport(Upstream::ClientApi, e)),
        };
        metrics::record_upstream_call(Upstream::ClientApi, path, &result);
        result
    }
}

#[async_trait]
impl CatalogSource for ClientApiClient {
    async fn fetch_courses(&self, params: &CoursesQueryParams) -> UpstreamResult<CoursesPageDto> {
        self.get("courses", &params.to_query_pairs()).await
    }

    async fn autocomplete(
        &self,
        kind: AutocompleteKind,
        term: &str,
    ) -> UpstreamResult<AutocompletePageDto> {
        self.get(
            "autocomplete",
            &[("type", kind.as_str().to_string()), ("q", term.to_string())],
        )
        .await
    }

    async fn fetch_course_details(
        &self,
        key: &EnrichmentKey,
    ) -> UpstreamResult<CatalogCourseDetailsDto> {
        self.get(
            "course-details",
            &[
                ("institution", key.institution.clone()),
                ("state", key.state.clone()),
                ("city", key.city.clone()),
                ("unitId", key.unit_id.clone()),
                ("sku", key.sku.clone()),
            ],
        )
        .await
    }

    async fn fetch_units_by_course(
        &self,
        query: &UnitsByCourseQuery,
    ) -> UpstreamResult<UnitsByCourseDto> {
        self.get(
            "units-by-course",
            &[
                ("institution", query.institution.clone()),
                ("state", query.state.clone()),
                ("city", query.city.clone()),
                ("course", query.course.clone()),
            ],
        )
        .await
    }
}

impl std::fmt::Debug for ClientApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
