//! Courses list filters.

use serde::Serialize;

use super::{flag, float, int, text, RawQuery};

/// Course duration buckets offered by the search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationRange {
    #[serde(rename = "ate-2-anos")]
    UpTo2Years,
    #[serde(rename = "2-a-3-anos")]
    From2To3Years,
    #[serde(rename = "3-a-4-anos")]
    From3To4Years,
    #[serde(rename = "mais-de-4-anos")]
    Over4Years,
}

impl DurationRange {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ate-2-anos" => Some(Self::UpTo2Years),
            "2-a-3-anos" => Some(Self::From2To3Years),
            "3-a-4-anos" => Some(Self::From3To4Years),
            "mais-de-4-anos" => Some(Self::Over4Years),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpTo2Years => "ate-2-anos",
            Self::From2To3Years => "2-a-3-anos",
            Self::From3To4Years => "3-a-4-anos",
            Self::Over4Years => "mais-de-4-anos",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseLevel {
    Graduacao,
    PosGraduacao,
}

impl CourseLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "graduacao" => Some(Self::Graduacao),
            "pos-graduacao" => Some(Self::PosGraduacao),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Graduacao => "graduacao",
            Self::PosGraduacao => "pos-graduacao",
        }
    }
}

/// Filters for `GET /courses`. Every field is optional; `None` means unfiltered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursesQueryParams {
    pub institution: Option<String>,
    pub location: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub modality: Option<u64>,
    pub category: Option<u64>,
    pub enrollment_open: Option<bool>,
    pub period: Option<u64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub duration_range: Option<DurationRange>,
    pub level: Option<CourseLevel>,
    pub course: Option<String>,
}

impl CoursesQueryParams {
    /// Never fails: malformed values are dropped.
    pub fn parse(raw: &RawQuery) -> Self {
        Self {
            institution: text(raw, "institution"),
            location: text(raw, "location"),
            page: int(raw, "page"),
            per_page: int(raw, "perPage"),
            modality: int(raw, "modality"),
            category: int(raw, "category"),
            enrollment_open: flag(raw, "enrollmentOpen"),
            period: int(raw, "period"),
            price_min: float(raw, "priceMin"),
            price_max: float(raw, "priceMax"),
            duration_range: text(raw, "durationRange").and_then(|v| DurationRange::parse(&v)),
            level: text(raw, "level").and_then(|v| CourseLevel::parse(&v)),
            course: text(raw, "course"),
        }
    }

    /// Query pairs forwarded to the client API, using the same names.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.institution {
            pairs.push(("institution", v.clone()));
        }
        if let Some(v) = &self.location {
            pairs.push(("location", v.clone()));
        }
        if let Some(v) = self.page {
            pairs.push(("page", v.to_string()));
        }
        if let Some(v) = self.per_page {
            pairs.push(("perPage", v.to_string()));
        }
        if let Some(v) = self.modality {
            pairs.push(("modality", v.to_string()));
        }
        if let Some(v) = self.category {
            pairs.push(("category", v.to_string()));
        }
        if let Some(v) = self.enrollment_open {
            pairs.push(("enrollmentOpen", v.to_string()));
        }
        if let Some(v) = self.period {
            pairs.push(("period", v.to_string()));
        }
        if let Some(v) = self.price_min {
            pairs.push(("priceMin", v.to_string()));
        }
        if let Some(v) = self.price_max {
            pairs.push(("priceMax", v.to_string()));
        }
        if let Some(v) = self.duration_range {
            pairs.push(("durationRange", v.as_str().to_string()));
        }
        if let Some(v) = self.level {
            pairs.push(("level", v.as_str().to_string()));
        }
        if let Some(v) = &self.course {
            pairs.push(("course", v.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::raw;

    #[test]
    fn test_empty_query_is_unfiltered() {
        assert_eq!(CoursesQueryParams::parse(&raw(&[])), CoursesQueryParams::default());
    }

    #[test]
    fn test_full_query() {
        let params = CoursesQueryParams::parse(&raw(&[
            ("institution", "unifacs"),
            ("location", "Salvador - BA"),
            ("page", "2"),
            ("perPage", "12"),
            ("modality", "3"),
            ("category", "8"),
            ("enrollmentOpen", "true"),
            ("period", "1"),
            ("priceMin", "199.90"),
            ("priceMax", "899"),
            ("durationRange", "3-a-4-anos"),
            ("level", "pos-graduacao"),
            ("course", "direito"),
        ]));

        assert_eq!(params.institution.as_deref(), Some("unifacs"));
        assert_eq!(params.location.as_deref(), Some("Salvador - BA"));
        assert_eq!(params.page, Some(2));
        assert_eq!(params.per_page, Some(12));
        assert_eq!(params.modality, Some(3));
        assert_eq!(params.category, Some(8));
        assert_eq!(params.enrollment_open, Some(true));
        assert_eq!(params.period, Some(1));
        assert_eq!(params.price_min, Some(199.9));
        assert_eq!(params.price_max, Some(899.0));
        assert_eq!(params.duration_range, Some(DurationRange::From3To4Years));
        assert_eq!(params.level, Some(CourseLevel::PosGraduacao));
        assert_eq!(params.course.as_deref(), Some("direito"));
    }

    #[test]
    fn test_malformed_values_are_dropped() {
        let params = CoursesQueryParams::parse(&raw(&[
            ("page", ""),
            ("perPage", "ten"),
            ("priceMin", "cheap"),
            ("durationRange", "forever"),
            ("level", "mestrado"),
            ("enrollmentOpen", "yes"),
        ]));

        assert_eq!(params.page, None);
        assert_eq!(params.per_page, None);
        assert_eq!(params.price_min, None);
        assert_eq!(params.duration_range, None);
        assert_eq!(params.level, None);
        assert_eq!(params.enrollment_open, Some(false));
    }

    #[test]
    fn test_query_pairs_skip_absent_fields() {
        let params = CoursesQueryParams {
            page: Some(3),
            level: Some(CourseLevel::Graduacao),
            enrollment_open: Some(false),
            ..Default::default()
        };
        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("page", "3".to_string()),
                ("enrollmentOpen", "false".to_string()),
                ("level", "graduacao".to_string()),
            ]
        );
    }
}
