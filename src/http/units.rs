use axum::extract::{Path, Query, State};
use axum::Json;

use super::AppState;
use crate::error::BffResult;
use crate::query::{RawQuery, UnitsByCourseQuery};
use crate::transform::{to_units_response, UnitsByCourseResponse};

/// `GET /courses/{slug}/units`: campuses offering a course in a city.
pub async fn units_by_course(
    State(state): State<AppState>,
    Path(course): Path<String>,
    Query(raw): Query<RawQuery>,
) -> BffResult<Json<UnitsByCourseResponse>> {
    let query = UnitsByCourseQuery::parse(&course, &raw)?;

    let dto = state.catalog.fetch_units_by_course(&query).await?;
    Ok(Json(to_units_response(&query.course, dto)))
}
