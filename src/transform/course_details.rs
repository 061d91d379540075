//! CMS course → course details, plus the client API enrichment block.
//!
//! The sibling `units`, `modalities` and `periods` arrays are collected from
//! the offerings themselves, so every offering reference resolves.

use serde::Serialize;

use super::modality::Modality;
use super::money::Money;
use super::{or_not_informed, NOT_INFORMED};
use crate::upstream::dto::{
    CatalogCourseDetailsDto, CatalogOfferingDto, CmsCourse, CmsModality, CmsNamed, CmsOffering,
    CmsUnit,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalitySummary {
    pub id: u64,
    pub name: String,
    pub slug: Modality,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingSummary {
    pub id: u64,
    pub unit_id: u64,
    pub modality_id: u64,
    pub period_id: u64,
    pub price: String,
    pub enrollment_open: bool,
    pub shift: String,
    pub unit: UnitSummary,
    pub modality: ModalitySummary,
    pub period: PeriodSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailsResponse {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub workload: String,
    pub category: String,
    pub duration: String,
    pub price_from: String,
    pub modalities: Vec<ModalitySummary>,
    pub units: Vec<UnitSummary>,
    pub periods: Vec<PeriodSummary>,
    pub offerings: Vec<OfferingSummary>,
}

impl CourseDetailsResponse {
    /// True when every offering's references resolve to sibling entries.
    pub fn references_resolve(&self) -> bool {
        self.offerings.iter().all(|o| {
            self.units.iter().any(|u| u.id == o.unit_id)
                && self.modalities.iter().any(|m| m.id == o.modality_id)
                && self.periods.iter().any(|p| p.id == o.period_id)
        })
    }
}

/// Pricing-service view of one course at one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientApiDetails {
    pub sku: String,
    pub price_from: String,
    pub offerings: Vec<ClientApiOffering>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientApiOffering {
    pub id: String,
    pub modality: Modality,
    pub shift: String,
    pub period: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<String>,
    pub enrollment_open: bool,
}

/// Course details as returned to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedCourseDetails {
    #[serde(flatten)]
    pub course: CourseDetailsResponse,
    #[serde(rename = "clientApiDetails", skip_serializing_if = "Option::is_none")]
    pub client_api_details: Option<ClientApiDetails>,
}

fn unit_summary(unit: &CmsUnit) -> UnitSummary {
    UnitSummary {
        id: unit.id,
        name: or_not_informed(unit.name.clone()),
        city: or_not_informed(unit.city.clone()),
        state: or_not_informed(unit.state.clone()),
    }
}

fn modality_summary(modality: &CmsModality) -> ModalitySummary {
    let slug = Modality::from_upstream_slug(modality.slug.as_deref());
    ModalitySummary {
        id: modality.id,
        name: modality
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| slug.as_str().to_string()),
        slug,
    }
}

fn period_summary(period: &CmsNamed) -> PeriodSummary {
    PeriodSummary {
        id: period.id,
        name: or_not_informed(period.name.clone()),
    }
}

fn format_optional(price: Option<Money>) -> String {
    price
        .map(|p| p.format_brl())
        .unwrap_or_else(|| NOT_INFORMED.to_string())
}

fn offering_summary(offering: &CmsOffering) -> Option<OfferingSummary> {
    let (Some(unit), Some(modality), Some(period)) =
        (&offering.unit, &offering.modality, &offering.period)
    else {
        tracing::debug!(offering_id = offering.id, "Dropping offering with missing references");
        return None;
    };

    Some(OfferingSummary {
        id: offering.id,
        unit_id: unit.id,
        modality_id: modality.id,
        period_id: period.id,
        price: format_optional(offering.price.and_then(Money::from_reais)),
        enrollment_open: offering.enrollment_open.unwrap_or(false),
        shift: or_not_informed(offering.shift.clone()),
        unit: unit_summary(unit),
        modality: modality_summary(modality),
        period: period_summary(period),
    })
}

fn push_unique<T: Clone>(list: &mut Vec<T>, item: &T, same: impl Fn(&T) -> bool) {
    if !list.iter().any(same) {
        list.push(item.clone());
    }
}

pub fn to_course_details(course: CmsCourse) -> CourseDetailsResponse {
    let offerings: Vec<OfferingSummary> =
        course.offerings.iter().filter_map(offering_summary).collect();

    let mut units = Vec::new();
    let mut modalities = Vec::new();
    let mut periods = Vec::new();
    for offering in &offerings {
        push_unique(&mut units, &offering.unit, |u: &UnitSummary| u.id == offering.unit_id);
        push_unique(&mut modalities, &offering.modality, |m: &ModalitySummary| {
            m.id == offering.modality_id
        });
        push_unique(&mut periods, &offering.period, |p: &PeriodSummary| {
            p.id == offering.period_id
        });
    }

    let price_from = course
        .offerings
        .iter()
        .filter(|o| o.unit.is_some() && o.modality.is_some() && o.period.is_some())
        .filter_map(|o| o.price.and_then(Money::from_reais))
        .min();

    CourseDetailsResponse {
        id: course.id,
        name: course.name,
        slug: course.slug,
        description: course.description.unwrap_or_default(),
        course_type: or_not_informed(course.course_type),
        workload: or_not_informed(course.workload),
        category: or_not_informed(course.category.and_then(|c| c.name)),
        duration: or_not_informed(course.duration),
        price_from: format_optional(price_from),
        modalities,
        units,
        periods,
        offerings,
    }
}

fn client_api_offering(offering: CatalogOfferingDto) -> ClientApiOffering {
    ClientApiOffering {
        id: offering.id,
        modality: Modality::from_upstream_slug(offering.modality.as_deref()),
        shift: or_not_informed(offering.shift),
        period: or_not_informed(offering.period),
        price: format_optional(offering.price.map(Money::from_cents)),
        discounted_price: offering
            .discounted_price
            .map(|p| Money::from_cents(p).format_brl()),
        enrollment_open: offering.enrollment_open,
    }
}

pub fn to_client_api_details(details: CatalogCourseDetailsDto) -> ClientApiDetails {
    let price_from = details
        .offerings
        .iter()
        .filter_map(|o| o.discounted_price.or(o.price))
        .map(Money::from_cents)
        .min();

    ClientApiDetails {
        sku: details.sku,
        price_from: format_optional(price_from),
        offerings: details.offerings.into_iter().map(client_api_offering).collect(),
    }
}
