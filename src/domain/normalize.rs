//! Entity normalization: raw daily records to annual model quantities.
//!
//! Records are filtered down to the scenario's target sets. Every target id
//! must have exactly one record; nothing is defaulted.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use super::error::{DomainError, EntityKind};
use super::id::{FacilityId, WarehouseId};
use super::record::{FacilityRecord, WarehouseRecord};
use super::scenario::Scenario;

/// A demand point with its annual requirement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    pub id: FacilityId,
    pub annual_demand: f64,
}

/// A candidate site with annualized capacity and fixed cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub annual_capacity: f64,
    /// Amortized construction plus a year of operation.
    pub annual_fixed_cost: f64,
}

/// Normalized facility and warehouse sets, in target order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedData {
    pub facilities: Vec<Facility>,
    pub warehouses: Vec<Warehouse>,
}

impl NormalizedData {
    /// Sum of annual demand over all facilities.
    #[must_use]
    pub fn total_demand(&self) -> f64 {
        self.facilities.iter().map(|f| f.annual_demand).sum()
    }

    /// Sum of annual capacity over all candidate sites.
    #[must_use]
    pub fn total_capacity(&self) -> f64 {
        self.warehouses.iter().map(|w| w.annual_capacity).sum()
    }

    #[must_use]
    pub fn facility(&self, id: &FacilityId) -> Option<&Facility> {
        self.facilities.iter().find(|f| &f.id == id)
    }

    #[must_use]
    pub fn warehouse(&self, id: &WarehouseId) -> Option<&Warehouse> {
        self.warehouses.iter().find(|w| &w.id == id)
    }
}

/// Normalize both entity sets for a scenario.
///
/// # Errors
///
/// Returns the first [`DomainError`] found: facilities are checked before
/// warehouses, each in target order.
pub fn normalize(
    facilities: &[FacilityRecord],
    warehouses: &[WarehouseRecord],
    scenario: &Scenario,
) -> Result<NormalizedData, DomainError> {
    Ok(NormalizedData {
        facilities: normalize_facilities(
            facilities,
            &scenario.target_facilities,
            scenario.days_per_year,
        )?,
        warehouses: normalize_warehouses(
            warehouses,
            &scenario.target_warehouses,
            scenario.days_per_year,
            scenario.amortization_years,
        )?,
    })
}

/// Annualize demand for each target facility.
///
/// # Errors
///
/// - [`DomainError::MissingEntity`] if a target has no record
/// - [`DomainError::DuplicateEntity`] if a target has several records
/// - [`DomainError::InvalidQuantity`] if a demand is negative or not finite
pub fn normalize_facilities(
    records: &[FacilityRecord],
    targets: &[FacilityId],
    days_per_year: u32,
) -> Result<Vec<Facility>, DomainError> {
    let index = index_records(records, |r| &r.facility_id);
    let days = f64::from(days_per_year);

    targets
        .iter()
        .map(|id| {
            let record = unique_record(&index, id, EntityKind::Facility, id.as_str())?;
            check_quantity(
                EntityKind::Facility,
                id.as_str(),
                "daily_demand",
                record.daily_demand,
                Bound::NonNegative,
            )?;
            Ok(Facility {
                id: id.clone(),
                annual_demand: record.daily_demand * days,
            })
        })
        .collect()
}

/// Annualize capacity and fixed cost for each target warehouse.
///
/// Fixed cost is `construction_cost / amortization_years +
/// operational_cost * days_per_year`.
///
/// # Errors
///
/// - [`DomainError::MissingEntity`] if a target has no record
/// - [`DomainError::DuplicateEntity`] if a target has several records
/// - [`DomainError::InvalidQuantity`] if capacity is not positive, a cost is
///   negative, or `amortization_years` is zero
pub fn normalize_warehouses(
    records: &[WarehouseRecord],
    targets: &[WarehouseId],
    days_per_year: u32,
    amortization_years: u32,
) -> Result<Vec<Warehouse>, DomainError> {
    let index = index_records(records, |r| &r.warehouse_id);
    let days = f64::from(days_per_year);
    let years = f64::from(amortization_years);

    targets
        .iter()
        .map(|id| {
            let record = unique_record(&index, id, EntityKind::Warehouse, id.as_str())?;
            let kind = EntityKind::Warehouse;
            check_quantity(kind, id.as_str(), "capacity", record.daily_capacity, Bound::Positive)?;
            check_quantity(
                kind,
                id.as_str(),
                "construction_cost",
                record.construction_cost,
                Bound::NonNegative,
            )?;
            check_quantity(
                kind,
                id.as_str(),
                "operational_cost",
                record.operational_cost,
                Bound::NonNegative,
            )?;
            check_quantity(kind, id.as_str(), "amortization_years", years, Bound::Positive)?;

            Ok(Warehouse {
                id: id.clone(),
                annual_capacity: record.daily_capacity * days,
                annual_fixed_cost: record.construction_cost / years
                    + record.operational_cost * days,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Bound {
    NonNegative,
    Positive,
}

pub(crate) fn check_quantity(
    kind: EntityKind,
    id: &str,
    field: &'static str,
    value: f64,
    bound: Bound,
) -> Result<(), DomainError> {
    let (ok, requirement) = match bound {
        Bound::NonNegative => (value >= 0.0, "must be 0 or greater"),
        Bound::Positive => (value > 0.0, "must be greater than 0"),
    };
    if ok && value.is_finite() {
        return Ok(());
    }
    Err(DomainError::InvalidQuantity {
        kind,
        id: id.to_string(),
        field,
        value,
        requirement: if value.is_finite() {
            requirement
        } else {
            "must be finite"
        },
    })
}

/// First record per key, plus how many records share that key.
fn index_records<'a, R, K, F>(records: &'a [R], key: F) -> HashMap<&'a K, (&'a R, usize)>
where
    K: Eq + Hash,
    F: Fn(&'a R) -> &'a K,
{
    let mut index: HashMap<&K, (&R, usize)> = HashMap::with_capacity(records.len());
    for record in records {
        index
            .entry(key(record))
            .and_modify(|(_, count)| *count += 1)
            .or_insert((record, 1));
    }
    index
}

fn unique_record<'a, R, K>(
    index: &HashMap<&K, (&'a R, usize)>,
    id: &K,
    kind: EntityKind,
    label: &str,
) -> Result<&'a R, DomainError>
where
    K: Eq + Hash,
{
    match index.get(id) {
        None => Err(DomainError::MissingEntity {
            kind,
            id: label.to_string(),
        }),
        Some(&(_, count)) if count > 1 => Err(DomainError::DuplicateEntity {
            kind,
            id: label.to_string(),
            count,
        }),
        Some(&(record, _)) => Ok(record),
    }
}
