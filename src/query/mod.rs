//! Query-string parsing.
//!
//! # Data Flow
//! ```text
//! axum Query<HashMap<String, String>>
//!     → per-endpoint parser (courses, autocomplete, details, seo, units)
//!     → typed params, or BffValidationError (400)
//! ```
//!
//! # Design Decisions
//! - Parsers are pure functions of the raw map
//! - Malformed optional values become `None`; only required discriminants fail
//! - Booleans are true only for the exact string `"true"`

pub mod autocomplete;
pub mod courses;
pub mod details;
pub mod seo;
pub mod units;

use std::collections::HashMap;

use crate::error::BffValidationError;

pub use autocomplete::{AutocompleteKind, AutocompleteQuery};
pub use courses::{CourseLevel, CoursesQueryParams, DurationRange};
pub use details::{CourseDetailsQuery, EnrichmentKey};
pub use seo::SeoQuery;
pub use units::UnitsByCourseQuery;

/// Raw query pairs as received from the front end.
pub type RawQuery = HashMap<String, String>;

/// Trimmed, non-empty string value.
pub(crate) fn text(raw: &RawQuery, key: &str) -> Option<String> {
    raw.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Required string value, 400 when absent or blank.
pub(crate) fn required_text(raw: &RawQuery, key: &str) -> Result<String, BffValidationError> {
    text(raw, key).ok_or_else(|| BffValidationError::missing(key))
}

/// Strict unsigned integer: digits only, no sign, no fraction.
pub(crate) fn int<T: std::str::FromStr>(raw: &RawQuery, key: &str) -> Option<T> {
    let value = raw.get(key)?.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Strict float: must parse completely and be finite.
pub(crate) fn float(raw: &RawQuery, key: &str) -> Option<f64> {
    let value = raw.get(key)?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Present → `Some(value == "true")`, absent → `None`.
pub(crate) fn flag(raw: &RawQuery, key: &str) -> Option<bool> {
    raw.get(key).map(|v| v == "true")
}

#[cfg(test)]
pub(crate) fn raw(pairs: &[(&str, &str)]) -> RawQuery {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
