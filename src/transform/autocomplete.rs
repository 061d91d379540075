use serde::Serialize;

use crate::query::AutocompleteKind;
use crate::upstream::dto::{AutocompleteItemDto, AutocompletePageDto};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityResult {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseResult {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
}

/// One result list whose item shape is fixed by the `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AutocompleteResponse {
    Cities { results: Vec<CityResult> },
    Courses { results: Vec<CourseResult> },
}

impl AutocompleteResponse {
    pub fn len(&self) -> usize {
        match self {
            AutocompleteResponse::Cities { results } => results.len(),
            AutocompleteResponse::Courses { results } => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn city_result(item: AutocompleteItemDto) -> Option<CityResult> {
    Some(CityResult {
        city: non_blank(item.city)?,
        state: non_blank(item.state)?,
    })
}

fn course_result(item: AutocompleteItemDto) -> Option<CourseResult> {
    Some(CourseResult {
        name: non_blank(item.name)?,
        slug: non_blank(item.slug)?,
        level: non_blank(item.level),
        course_type: non_blank(item.course_type),
    })
}

/// Keep only items that carry the fields their kind requires.
pub fn to_autocomplete_response(
    kind: AutocompleteKind,
    page: AutocompletePageDto,
) -> AutocompleteResponse {
    match kind {
        AutocompleteKind::Cities => AutocompleteResponse::Cities {
            results: page.results.into_iter().filter_map(city_result).collect(),
        },
        AutocompleteKind::Courses => AutocompleteResponse::Courses {
            results: page.results.into_iter().filter_map(course_result).collect(),
        },
    }
}
