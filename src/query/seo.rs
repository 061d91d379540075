use super::{flag, required_text, RawQuery};
use crate::error::BffValidationError;

/// `GET /seos` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoQuery {
    pub institution_slug: String,
    pub no_cache: bool,
}

impl SeoQuery {
    pub fn parse(raw: &RawQuery) -> Result<Self, BffValidationError> {
        Ok(Self {
            institution_slug: required_text(raw, "institutionSlug")?,
            no_cache: flag(raw, "noCache").unwrap_or(false),
        })
    }
}
