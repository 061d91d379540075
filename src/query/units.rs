use super::{required_text, RawQuery};
use crate::error::BffValidationError;

/// `GET /courses/{slug}/units` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitsByCourseQuery {
    /// Course sku; the route's path segment.
    pub course: String,
    pub institution: String,
    pub state: String,
    pub city: String,
}

impl UnitsByCourseQuery {
    pub fn parse(course: &str, raw: &RawQuery) -> Result<Self, BffValidationError> {
        let course = course.trim();
        if course.is_empty() {
            return Err(BffValidationError::missing("course"));
        }
        Ok(Self {
            course: course.to_string(),
            institution: required_text(raw, "institution")?,
            state: required_text(raw, "state")?,
            city: required_text(raw, "city")?,
        })
    }
}
