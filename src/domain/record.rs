//! Raw input records as parsed from tabular data.
//!
//! Coordinates are carried through for the visualization hand-off only; the
//! model never reads them.

use serde::{Deserialize, Serialize};

use super::id::{FacilityId, WarehouseId};

/// Daily demand of one facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub facility_id: FacilityId,
    pub daily_demand: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl FacilityRecord {
    pub fn new(facility_id: impl Into<FacilityId>, daily_demand: f64) -> Self {
        Self {
            facility_id: facility_id.into(),
            daily_demand,
            latitude: None,
            longitude: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// Candidate warehouse site with daily capacity and cost data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    pub warehouse_id: WarehouseId,
    /// Units per day.
    #[serde(alias = "capacity")]
    pub daily_capacity: f64,
    /// One-off build cost, amortized over the configured horizon.
    pub construction_cost: f64,
    /// Running cost per day.
    pub operational_cost: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl WarehouseRecord {
    pub fn new(
        warehouse_id: impl Into<WarehouseId>,
        daily_capacity: f64,
        construction_cost: f64,
        operational_cost: f64,
    ) -> Self {
        Self {
            warehouse_id: warehouse_id.into(),
            daily_capacity,
            construction_cost,
            operational_cost,
            latitude: None,
            longitude: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// Per-unit transport cost on one lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneRecord {
    pub from_warehouse: WarehouseId,
    pub to_facility: FacilityId,
    pub cost_per_unit: f64,
}

impl LaneRecord {
    pub fn new(
        from_warehouse: impl Into<WarehouseId>,
        to_facility: impl Into<FacilityId>,
        cost_per_unit: f64,
    ) -> Self {
        Self {
            from_warehouse: from_warehouse.into(),
            to_facility: to_facility.into(),
            cost_per_unit,
        }
    }
}

/// All raw records of one scenario.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub facilities: Vec<FacilityRecord>,
    pub warehouses: Vec<WarehouseRecord>,
    pub lanes: Vec<LaneRecord>,
}
