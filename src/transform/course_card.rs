//! Client API course list → course cards.

use serde::Serialize;

use super::modality::Modality;
use super::money::Money;
use super::or_not_informed;
use crate::query::CoursesQueryParams;
use crate::upstream::dto::{CatalogCourseDto, CoursesPageDto};

/// Page size when neither the request nor the upstream names one.
pub const DEFAULT_PER_PAGE: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseData {
    pub id: String,
    pub category: String,
    pub title: String,
    pub degree: String,
    pub duration: String,
    /// Never empty.
    pub modalities: Vec<Modality>,
    pub price_from: String,
    pub campus_name: String,
    pub campus_city: String,
    pub campus_state: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesResponse {
    pub total: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub per_page: u32,
    pub courses: Vec<CourseData>,
}

pub fn to_course_data(course: CatalogCourseDto) -> CourseData {
    let mut modalities = Vec::with_capacity(course.modalities.len().max(1));
    for slug in &course.modalities {
        let modality = Modality::from_upstream_slug(Some(slug));
        if !modalities.contains(&modality) {
            modalities.push(modality);
        }
    }
    if modalities.is_empty() {
        modalities.push(Modality::default());
    }

    let price = course.min_price.map(Money::from_cents).unwrap_or(Money::ZERO);
    let unit = course.unit;

    CourseData {
        id: course.id,
        category: or_not_informed(course.category),
        title: course.name,
        degree: or_not_informed(course.degree),
        duration: or_not_informed(course.duration),
        modalities,
        price_from: price.format_brl(),
        campus_name: or_not_informed(unit.as_ref().and_then(|u| u.name.clone())),
        campus_city: or_not_informed(unit.as_ref().and_then(|u| u.city.clone())),
        campus_state: or_not_informed(unit.and_then(|u| u.state)),
        slug: course.slug,
    }
}

/// Build the paginated response, honoring the request's page size first.
pub fn to_courses_response(page: CoursesPageDto, params: &CoursesQueryParams) -> CoursesResponse {
    let per_page = params
        .per_page
        .filter(|n| *n > 0)
        .or(page.per_page.filter(|n| *n > 0))
        .unwrap_or(DEFAULT_PER_PAGE);

    let total_pages = u32::try_from(page.total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX);

    let mut current_page = params.page.or(page.page).unwrap_or(1).max(1);
    if page.total > 0 {
        current_page = current_page.min(total_pages);
    }

    let courses = page
        .data
        .into_iter()
        .take(per_page as usize)
        .map(to_course_data)
        .collect();

    CoursesResponse {
        total: page.total,
        current_page,
        total_pages,
        per_page,
        courses,
    }
}
