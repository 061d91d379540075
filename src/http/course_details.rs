//! Course details: CMS lookup by slug, then best-effort pricing enrichment.
//!
//! Enrichment failures never fail the request. The caller gets the CMS data
//! without `clientApiDetails`.

use axum::extract::{Path, Query, State};
use axum::Json;
use thiserror::Error;

use super::AppState;
use crate::error::{BffError, BffResult};
use crate::observability::metrics;
use crate::query::{CourseDetailsQuery, EnrichmentKey, RawQuery};
use crate::transform::{
    to_client_api_details, to_course_details, ClientApiDetails, EnrichedCourseDetails,
};
use crate::upstream::dto::CmsCourse;
use crate::upstream::{CatalogSource, CmsQuery, FilterOp, UpstreamError};

const COURSE_RELATIONS: &[&str] = &[
    "offerings.unit",
    "offerings.modality",
    "offerings.period",
    "category",
    "institution",
];

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("enrichment key incomplete: missing {0}")]
    Incomplete(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl EnrichmentError {
    fn reason(&self) -> &'static str {
        match self {
            EnrichmentError::Incomplete(_) => "incomplete_key",
            EnrichmentError::Upstream(_) => "upstream_error",
        }
    }
}

pub fn course_by_slug_query(slug: &str) -> CmsQuery {
    CmsQuery::new()
        .filter(&["slug"], FilterOp::Eq, slug)
        .populate(COURSE_RELATIONS)
}

async fn enrich(
    catalog: &dyn CatalogSource,
    query: &CourseDetailsQuery,
    course: &CmsCourse,
) -> Result<ClientApiDetails, EnrichmentError> {
    let cms_institution = course.institution.as_ref().map(|i| i.slug.as_str());
    let key = EnrichmentKey::resolve(query, cms_institution, course.sku.as_deref())
        .map_err(EnrichmentError::Incomplete)?;

    let details = catalog.fetch_course_details(&key).await?;
    Ok(to_client_api_details(details))
}

/// `GET /courses/{slug}`.
pub async fn course_details(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(raw): Query<RawQuery>,
) -> BffResult<Json<EnrichedCourseDetails>> {
    let query = CourseDetailsQuery::parse(&slug, &raw)?;

    let envelope = state
        .cms
        .fetch("courses", &course_by_slug_query(&query.slug), false)
        .await?
        .decode::<CmsCourse>()?;
    let course = envelope
        .data
        .into_iter()
        .next()
        .ok_or_else(|| BffError::NotFound("Course not found".to_string()))?;

    let client_api_details = match enrich(state.catalog.as_ref(), &query, &course).await {
        Ok(details) => Some(details),
        Err(e @ EnrichmentError::Incomplete(_)) => {
            tracing::debug!(slug = %query.slug, reason = %e, "Skipping enrichment");
            metrics::record_enrichment_fallback(e.reason());
            None
        }
        Err(e) => {
            tracing::warn!(slug = %query.slug, error = %e, "Enrichment failed, serving CMS data only");
            metrics::record_enrichment_fallback(e.reason());
            None
        }
    };

    Ok(Json(EnrichedCourseDetails {
        course: to_course_details(course),
        client_api_details,
    }))
}
