//! Course details: the slug path segment plus optional enrichment hints.

use super::{text, RawQuery};
use crate::error::BffValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDetailsQuery {
    pub slug: String,
    pub institution: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub unit_id: Option<String>,
    pub sku: Option<String>,
}

impl CourseDetailsQuery {
    pub fn parse(slug: &str, raw: &RawQuery) -> Result<Self, BffValidationError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(BffValidationError::missing("slug"));
        }

        Ok(Self {
            slug: slug.to_string(),
            institution: text(raw, "institution"),
            state: text(raw, "state"),
            city: text(raw, "city"),
            unit_id: text(raw, "unitId"),
            sku: text(raw, "sku"),
        })
    }
}

/// Everything the pricing service needs to price one course at one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentKey {
    pub institution: String,
    pub state: String,
    pub city: String,
    pub unit_id: String,
    pub sku: String,
}

impl EnrichmentKey {
    /// Assemble a key from the query, falling back to values from the CMS
    /// course. Returns the name of the first missing part otherwise.
    pub fn resolve(
        query: &CourseDetailsQuery,
        cms_institution: Option<&str>,
        cms_sku: Option<&str>,
    ) -> Result<Self, &'static str> {
        let institution = query
            .institution
            .clone()
            .or_else(|| cms_institution.map(str::to_string))
            .ok_or("institution")?;
        let state = query.state.clone().ok_or("state")?;
        let city = query.city.clone().ok_or("city")?;
        let unit_id = query.unit_id.clone().ok_or("unitId")?;
        let sku = query
            .sku
            .clone()
            .or_else(|| cms_sku.map(str::to_string))
            .ok_or("sku")?;

        Ok(Self {
            institution,
            state,
            city,
            unit_id,
            sku,
        })
    }
}
