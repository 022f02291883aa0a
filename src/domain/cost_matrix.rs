//! Lane cost matrix over the target warehouse x facility cross-product.

use std::collections::HashMap;

use super::error::{DomainError, EntityKind};
use super::id::{FacilityId, LaneId, WarehouseId};
use super::normalize::{check_quantity, Bound};
use super::record::LaneRecord;

/// Per-unit transport cost for every required lane.
///
/// Construction guarantees totality over the target cross-product, so
/// lookups for target pairs never miss.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostMatrix {
    costs: HashMap<LaneId, f64>,
}

impl CostMatrix {
    /// Build the matrix from raw lane records.
    ///
    /// Records for lanes outside the target sets are dropped.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidQuantity`] for a negative or non-finite cost
    /// - [`DomainError::DuplicateLane`] if a target lane has several records
    /// - [`DomainError::MissingLane`] for the first uncovered pair, scanning
    ///   warehouses then facilities in target order
    pub fn build(
        records: &[LaneRecord],
        warehouses: &[WarehouseId],
        facilities: &[FacilityId],
    ) -> Result<Self, DomainError> {
        let mut costs = HashMap::with_capacity(warehouses.len() * facilities.len());

        for record in records {
            if !warehouses.contains(&record.from_warehouse)
                || !facilities.contains(&record.to_facility)
            {
                continue;
            }
            let lane = LaneId::new(record.from_warehouse.clone(), record.to_facility.clone());
            check_quantity(
                EntityKind::Lane,
                &lane.to_string(),
                "cost_per_unit",
                record.cost_per_unit,
                Bound::NonNegative,
            )?;
            if costs.insert(lane, record.cost_per_unit).is_some() {
                return Err(DomainError::DuplicateLane {
                    warehouse: record.from_warehouse.clone(),
                    facility: record.to_facility.clone(),
                });
            }
        }

        for warehouse in warehouses {
            for facility in facilities {
                let lane = LaneId::new(warehouse.clone(), facility.clone());
                if !costs.contains_key(&lane) {
                    return Err(DomainError::MissingLane {
                        warehouse: warehouse.clone(),
                        facility: facility.clone(),
                    });
                }
            }
        }

        Ok(Self { costs })
    }

    /// Unit cost of a lane, if it is part of the matrix.
    #[must_use]
    pub fn get(&self, warehouse: &WarehouseId, facility: &FacilityId) -> Option<f64> {
        self.costs
            .get(&LaneId::new(warehouse.clone(), facility.clone()))
            .copied()
    }

    /// Number of lanes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}
