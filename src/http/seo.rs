use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;

use super::cache_control::cache_headers;
use super::AppState;
use crate::error::{BffError, BffResult};
use crate::query::{RawQuery, SeoQuery};
use crate::upstream::dto::CmsEnvelope;
use crate::upstream::{CmsQuery, FilterOp};

pub fn seo_by_institution_query(institution_slug: &str) -> CmsQuery {
    CmsQuery::new()
        .filter(&["institution", "slug"], FilterOp::Eq, institution_slug)
        .populate_all()
}

/// `GET /seos`: the CMS envelope passed through with cache headers.
/// An empty result is a 200; any upstream error is a 500.
pub async fn seos(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
) -> BffResult<(HeaderMap, Json<CmsEnvelope<Value>>)> {
    let query = SeoQuery::parse(&raw)?;

    let envelope = state
        .cms
        .fetch(
            "seos",
            &seo_by_institution_query(&query.institution_slug),
            query.no_cache,
        )
        .await
        .map_err(BffError::UpstreamFailure)?;

    Ok((cache_headers(&state.cache, query.no_cache), Json(envelope)))
}
