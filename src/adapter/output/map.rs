//! Network-map document for the visualization collaborator.
//!
//! Carries everything a plotter needs (coordinates, open flags and flow
//! segments with a relative line weight) without rendering anything itself.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::{FacilityId, Plan, RecordSet, Scenario, WarehouseId};
use crate::error::Result;

/// Thinnest flow line.
const MIN_WEIGHT: f64 = 1.0;
/// Extra weight given to the largest flow.
const WEIGHT_SPAN: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub id: FacilityId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSite {
    pub id: WarehouseId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFlow {
    pub warehouse: WarehouseId,
    pub facility: FacilityId,
    pub units: f64,
    /// `1 + 5 * units / max_units`.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkMap {
    pub title: String,
    pub total_cost: f64,
    pub facilities: Vec<MapPoint>,
    pub warehouses: Vec<MapSite>,
    pub flows: Vec<MapFlow>,
}

/// Assemble the map for a solved plan.
#[must_use]
pub fn network_map(plan: &Plan, records: &RecordSet, scenario: &Scenario) -> NetworkMap {
    let facility_coords: HashMap<&FacilityId, (Option<f64>, Option<f64>)> = records
        .facilities
        .iter()
        .map(|r| (&r.facility_id, (r.latitude, r.longitude)))
        .collect();
    let warehouse_coords: HashMap<&WarehouseId, (Option<f64>, Option<f64>)> = records
        .warehouses
        .iter()
        .map(|r| (&r.warehouse_id, (r.latitude, r.longitude)))
        .collect();

    let facilities = scenario
        .target_facilities
        .iter()
        .map(|id| {
            let (latitude, longitude) = facility_coords.get(id).copied().unwrap_or_default();
            MapPoint {
                id: id.clone(),
                latitude,
                longitude,
            }
        })
        .collect();

    let warehouses = plan
        .sites
        .iter()
        .map(|site| {
            let (latitude, longitude) = warehouse_coords
                .get(&site.warehouse)
                .copied()
                .unwrap_or_default();
            MapSite {
                id: site.warehouse.clone(),
                latitude,
                longitude,
                open: site.open,
            }
        })
        .collect();

    let max_units = plan
        .shipments
        .iter()
        .map(|s| s.units)
        .fold(0.0_f64, f64::max);
    let flows = plan
        .shipments
        .iter()
        .map(|s| MapFlow {
            warehouse: s.warehouse.clone(),
            facility: s.facility.clone(),
            units: s.units,
            weight: MIN_WEIGHT + WEIGHT_SPAN * s.units / max_units,
        })
        .collect();

    NetworkMap {
        title: format!(
            "Optimal Supply Distribution Network (Total Cost: ${:.0})",
            plan.costs.total
        ),
        total_cost: plan.costs.total,
        facilities,
        warehouses,
        flows,
    }
}

/// Write the map as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn write_network_map(map: &NetworkMap, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(map)?;
    fs::write(path, json)?;
    info!(path = %path.display(), flows = map.flows.len(), "Network map written");
    Ok(())
}
