//! Wire shapes of the CMS and client API payloads.
//!
//! These mirror what the upstreams send and nothing more. Units are the
//! upstream's own: CMS prices are decimal reais, client API prices are
//! integer centavos. Conversion into `Money` happens in `transform`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::upstream::types::{Upstream, UpstreamError, UpstreamResult};

// ---------------------------------------------------------------------------
// CMS
// ---------------------------------------------------------------------------

/// Paginated CMS envelope: `{ data: [...], meta: { pagination } }`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CmsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: CmsMeta,
}

impl<T> Default for CmsEnvelope<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            meta: CmsMeta::default(),
        }
    }
}

impl CmsEnvelope<Value> {
    /// Reinterpret the untyped entries as `T`.
    pub fn decode<T: DeserializeOwned>(self) -> UpstreamResult<CmsEnvelope<T>> {
        let data = self
            .data
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| UpstreamError::Decode(Upstream::Cms, e.to_string()))?;
        Ok(CmsEnvelope {
            data,
            meta: self.meta,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CmsMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<CmsPagination>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsPagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsCourse {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub course_type: Option<String>,
    #[serde(default)]
    pub workload: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<CmsNamed>,
    #[serde(default)]
    pub institution: Option<CmsInstitutionRef>,
    #[serde(default)]
    pub offerings: Vec<CmsOffering>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmsNamed {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmsInstitutionRef {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsOffering {
    pub id: u64,
    /// Price in reais.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub enrollment_open: Option<bool>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub unit: Option<CmsUnit>,
    #[serde(default)]
    pub modality: Option<CmsModality>,
    #[serde(default)]
    pub period: Option<CmsNamed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmsUnit {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmsModality {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

// ---------------------------------------------------------------------------
// Client API
// ---------------------------------------------------------------------------

/// `GET /courses` page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesPageDto {
    #[serde(default)]
    pub data: Vec<CatalogCourseDto>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCourseDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    /// Modality slugs as the pricing service spells them.
    #[serde(default)]
    pub modalities: Vec<String>,
    /// Lowest offering price in centavos.
    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub unit: Option<CatalogUnitDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogUnitDto {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// One `GET /autocomplete` hit. The populated fields depend on the kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteItemDto {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, rename = "type")]
    pub course_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutocompletePageDto {
    #[serde(default)]
    pub results: Vec<AutocompleteItemDto>,
}

/// `GET /course-details` payload used for enrichment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCourseDetailsDto {
    pub sku: String,
    #[serde(default)]
    pub offerings: Vec<CatalogOfferingDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOfferingDto {
    pub id: String,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    /// Price in centavos.
    #[serde(default)]
    pub price: Option<i64>,
    /// Price after discounts, in centavos.
    #[serde(default)]
    pub discounted_price: Option<i64>,
    #[serde(default)]
    pub enrollment_open: bool,
}

/// `GET /units-by-course` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitsByCourseDto {
    #[serde(default)]
    pub units: Vec<CatalogUnitDto>,
}
