use serde::Serialize;

use super::or_not_informed;
use crate::upstream::dto::{CatalogUnitDto, UnitsByCourseDto};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampusUnit {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitsByCourseResponse {
    pub course: String,
    pub units: Vec<CampusUnit>,
}

fn campus_unit(unit: CatalogUnitDto) -> CampusUnit {
    CampusUnit {
        id: unit.id,
        name: or_not_informed(unit.name),
        city: or_not_informed(unit.city),
        state: or_not_informed(unit.state),
        address: unit.address.filter(|a| !a.trim().is_empty()),
    }
}

/// Units sorted by name; duplicate ids keep their first occurrence.
pub fn to_units_response(course: &str, dto: UnitsByCourseDto) -> UnitsByCourseResponse {
    let mut units: Vec<CampusUnit> = Vec::with_capacity(dto.units.len());
    for unit in dto.units.into_iter().map(campus_unit) {
        if !units.iter().any(|u| u.id == unit.id) {
            units.push(unit);
        }
    }
    units.sort_by(|a, b| a.name.cmp(&b.name));

    UnitsByCourseResponse {
        course: course.to_string(),
        units,
    }
}
