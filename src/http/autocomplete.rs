use axum::extract::{Query, State};
use axum::Json;

use super::AppState;
use crate::error::{BffError, BffResult};
use crate::query::{AutocompleteQuery, RawQuery};
use crate::transform::{to_autocomplete_response, AutocompleteResponse};

/// `GET /courses/autocomplete`. The `type` check runs before any upstream call.
/// Upstream errors, 404 included, answer 500.
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
) -> BffResult<Json<AutocompleteResponse>> {
    let query = AutocompleteQuery::parse(&raw)?;

    let page = state
        .catalog
        .autocomplete(query.kind, &query.term)
        .await
        .map_err(BffError::UpstreamFailure)?;
    let response = to_autocomplete_response(query.kind, page);
    tracing::debug!(kind = query.kind.as_str(), results = response.len(), "Autocomplete served");
    Ok(Json(response))
}
