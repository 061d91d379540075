//! Upstream HTTP clients.
//!
//! # Data Flow
//! ```text
//! handler
//!     → ContentSource (CMS: seos, courses, institutions, faqs, banners)
//!     → CatalogSource (client API: courses, autocomplete, details, units)
//!     → reqwest → upstream
//!     → dto.rs wire shapes, or UpstreamError
//! ```
//!
//! # Design Decisions
//! - Clients are built from explicit `UpstreamConfig` and fail fast when unconfigured
//! - No retries or backoff; the reqwest timeout is the only bound
//! - 404 becomes a tagged `UpstreamError::NotFound`

pub mod client_api;
pub mod cms;
pub mod dto;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;

use crate::query::{AutocompleteKind, CoursesQueryParams, EnrichmentKey, UnitsByCourseQuery};
use dto::{AutocompletePageDto, CatalogCourseDetailsDto, CmsEnvelope, CoursesPageDto, UnitsByCourseDto};

pub use client_api::ClientApiClient;
pub use cms::{CmsClient, CmsQuery, FilterOp};
pub use types::{Upstream, UpstreamError, UpstreamResult};

/// Content lookups against the headless CMS.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one collection page. `no_cache` asks intermediaries to bypass caches.
    async fn fetch(
        &self,
        collection: &str,
        query: &CmsQuery,
        no_cache: bool,
    ) -> UpstreamResult<CmsEnvelope<Value>>;
}

/// Pricing and enrollment lookups against the client API.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_courses(&self, params: &CoursesQueryParams) -> UpstreamResult<CoursesPageDto>;

    async fn autocomplete(
        &self,
        kind: AutocompleteKind,
        term: &str,
    ) -> UpstreamResult<AutocompletePageDto>;

    async fn fetch_course_details(
        &self,
        key: &EnrichmentKey,
    ) -> UpstreamResult<CatalogCourseDetailsDto>;

    async fn fetch_units_by_course(
        &self,
        query: &UnitsByCourseQuery,
    ) -> UpstreamResult<UnitsByCourseDto>;
}
