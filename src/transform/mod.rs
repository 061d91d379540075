//! Pure mappings from upstream DTOs to front-end response shapes.
//!
//! # Design Decisions
//! - Missing display fields become "Não informado", never null
//! - Every price goes through `Money::format_brl`
//! - Modality slugs go through one fixed table

pub mod autocomplete;
pub mod course_card;
pub mod course_details;
pub mod modality;
pub mod money;
pub mod units;

pub use autocomplete::{to_autocomplete_response, AutocompleteResponse};
pub use course_card::{to_courses_response, CourseData, CoursesResponse};
pub use course_details::{
    to_client_api_details, to_course_details, ClientApiDetails, CourseDetailsResponse,
    EnrichedCourseDetails,
};
pub use modality::Modality;
pub use money::Money;
pub use units::{to_units_response, UnitsByCourseResponse};

/// Placeholder shown for any missing display field.
pub const NOT_INFORMED: &str = "Não informado";

pub(crate) fn or_not_informed(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_INFORMED.to_string())
}
