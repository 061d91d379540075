use axum::extract::{Query, State};
use axum::Json;

use super::AppState;
use crate::error::BffResult;
use crate::query::{CoursesQueryParams, RawQuery};
use crate::transform::{to_courses_response, CoursesResponse};

/// `GET /courses`: filtered, paginated course cards.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
) -> BffResult<Json<CoursesResponse>> {
    let params = CoursesQueryParams::parse(&raw);
    tracing::debug!(page = ?params.page, institution = ?params.institution, "Listing courses");

    let page = state.catalog.fetch_courses(&params).await?;
    Ok(Json(to_courses_response(page, &params)))
}
