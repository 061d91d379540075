use serde::Serialize;

/// Course delivery modality as the front end knows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    #[default]
    Presencial,
    Semipresencial,
    Ead,
}

impl Modality {
    /// Map an upstream slug. Unknown or missing slugs fall back to
    /// `Presencial`.
    pub fn from_upstream_slug(slug: Option<&str>) -> Self {
        match slug.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("presencial") => Modality::Presencial,
            Some("ead") => Modality::Ead,
            Some("hibrido") | Some("semipresencial") => Modality::Semipresencial,
            _ => Modality::Presencial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Presencial => "presencial",
            Modality::Semipresencial => "semipresencial",
            Modality::Ead => "ead",
        }
    }
}
