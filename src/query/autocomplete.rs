//! Autocomplete query: a required `type` discriminant and free-text `q`.

use super::{text, RawQuery};
use crate::error::BffValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteKind {
    Cities,
    Courses,
}

impl AutocompleteKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cities" => Some(Self::Cities),
            "courses" => Some(Self::Courses),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cities => "cities",
            Self::Courses => "courses",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteQuery {
    pub kind: AutocompleteKind,
    /// Search text; empty when absent.
    pub term: String,
}

impl AutocompleteQuery {
    pub fn parse(raw: &RawQuery) -> Result<Self, BffValidationError> {
        let kind = match raw.get("type").map(String::as_str) {
            None | Some("") => return Err(BffValidationError::missing("type")),
            Some(value) => AutocompleteKind::parse(value).ok_or_else(|| {
                BffValidationError::bad_request(format!(
                    "Invalid type '{value}': expected 'cities' or 'courses'"
                ))
            })?,
        };

        Ok(Self {
            kind,
            term: text(raw, "q").unwrap_or_default(),
        })
    }
}
