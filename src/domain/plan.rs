//! Result extraction: solved variable values back to domain quantities.

use serde::Serialize;
use tracing::warn;

use super::error::DomainError;
use super::id::{FacilityId, WarehouseId};
use super::model::ModelInstance;

/// Open-indicator values above this count as a selected site.
pub const OPEN_THRESHOLD: f64 = 0.5;

/// Shipments at or below this volume are solver noise and not listed.
pub const SHIPMENT_EPSILON: f64 = 1e-6;

/// Relative tolerance for cost reconciliation.
pub const RECONCILIATION_TOLERANCE: f64 = 1e-6;

/// Variable values of an optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Indexed like the instance's problem variables.
    pub values: Vec<f64>,
    /// Objective value reported by the solver; NaN if it reported none.
    pub objective: f64,
}

/// Reported state of one candidate site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteReport {
    pub warehouse: WarehouseId,
    pub open: bool,
    pub capacity: f64,
    pub fixed_cost: f64,
    /// Total volume shipped from the site.
    pub shipped: f64,
    /// `shipped / capacity`; `None` for closed sites.
    pub utilization: Option<f64>,
}

/// One lane with positive flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment {
    pub warehouse: WarehouseId,
    pub facility: FacilityId,
    pub units: f64,
    pub unit_cost: f64,
    /// `units * unit_cost`.
    pub cost: f64,
}

/// Annual cost split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub total: f64,
    pub fixed: f64,
    pub transport: f64,
}

/// Read-only view of a solved plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    /// Every candidate site, in target order.
    pub sites: Vec<SiteReport>,
    /// Lanes carrying more than [`SHIPMENT_EPSILON`], warehouse-major.
    pub shipments: Vec<Shipment>,
    pub costs: CostBreakdown,
    pub budget_limit: f64,
    /// `budget_limit - costs.total`. Negative only if the model is wrong.
    pub budget_headroom: f64,
}

impl Plan {
    /// Sites with the open indicator set.
    pub fn selected_sites(&self) -> impl Iterator<Item = &SiteReport> {
        self.sites.iter().filter(|s| s.open)
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.selected_sites().count()
    }

    /// Total volume received by a facility across all listed shipments.
    #[must_use]
    pub fn received(&self, facility: &FacilityId) -> f64 {
        self.shipments
            .iter()
            .filter(|s| &s.facility == facility)
            .map(|s| s.units)
            .sum()
    }

    #[must_use]
    pub fn site(&self, warehouse: &WarehouseId) -> Option<&SiteReport> {
        self.sites.iter().find(|s| &s.warehouse == warehouse)
    }
}

/// Interpret an optimal assignment against the instance it solved.
///
/// # Errors
///
/// - [`DomainError::AssignmentShape`] if the value count does not match the
///   instance's variables
/// - [`DomainError::Reconciliation`] if fixed plus transport cost does not
///   equal the total within [`RECONCILIATION_TOLERANCE`]
pub fn extract_plan(instance: &ModelInstance, assignment: &Assignment) -> Result<Plan, DomainError> {
    let problem = instance.problem();
    let values = &assignment.values;
    if values.len() != problem.num_vars() {
        return Err(DomainError::AssignmentShape {
            expected: problem.num_vars(),
            actual: values.len(),
        });
    }

    let data = instance.data();
    let mut sites = Vec::with_capacity(data.warehouses.len());
    let mut shipments = Vec::new();
    let mut fixed = 0.0;
    let mut transport = 0.0;

    for (w, warehouse) in data.warehouses.iter().enumerate() {
        let open_value = values[instance.open_var(w)];
        let open = open_value > OPEN_THRESHOLD;
        fixed += warehouse.annual_fixed_cost * open_value;

        let mut shipped = 0.0;
        for (f, facility) in data.facilities.iter().enumerate() {
            let units = values[instance.ship_var(w, f)];
            let unit_cost = instance
                .costs()
                .get(&warehouse.id, &facility.id)
                .ok_or_else(|| DomainError::MissingLane {
                    warehouse: warehouse.id.clone(),
                    facility: facility.id.clone(),
                })?;
            shipped += units;
            transport += unit_cost * units;

            if units > SHIPMENT_EPSILON {
                shipments.push(Shipment {
                    warehouse: warehouse.id.clone(),
                    facility: facility.id.clone(),
                    units,
                    unit_cost,
                    cost: units * unit_cost,
                });
            }
        }

        sites.push(SiteReport {
            warehouse: warehouse.id.clone(),
            open,
            capacity: warehouse.annual_capacity,
            fixed_cost: warehouse.annual_fixed_cost,
            shipped,
            utilization: open.then(|| shipped / warehouse.annual_capacity),
        });
    }

    let total = if assignment.objective.is_finite() {
        assignment.objective
    } else {
        problem.objective.evaluate(values)
    };
    reconcile(total, fixed, transport)?;

    let budget_headroom = instance.budget_limit() - total;
    if budget_headroom < -RECONCILIATION_TOLERANCE * total.abs().max(1.0) {
        warn!(
            total_cost = total,
            budget_limit = instance.budget_limit(),
            "Solved plan exceeds the budget ceiling"
        );
    }

    Ok(Plan {
        sites,
        shipments,
        costs: CostBreakdown {
            total,
            fixed,
            transport,
        },
        budget_limit: instance.budget_limit(),
        budget_headroom,
    })
}

fn reconcile(total: f64, fixed: f64, transport: f64) -> Result<(), DomainError> {
    let gap = (fixed + transport - total).abs();
    if gap <= RECONCILIATION_TOLERANCE * total.abs().max(1.0) {
        return Ok(());
    }
    Err(DomainError::Reconciliation {
        total,
        fixed,
        transport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cost_matrix::CostMatrix;
    use crate::domain::model::ModelBuilder;
    use crate::domain::normalize::{Facility, NormalizedData, Warehouse};
    use crate::domain::record::LaneRecord;

    fn instance(budget: f64) -> ModelInstance {
        let data = NormalizedData {
            facilities: vec![
                Facility {
                    id: "F1".into(),
                    annual_demand: 40.0,
                },
                Facility {
                    id: "F2".into(),
                    annual_demand: 60.0,
                },
            ],
            warehouses: vec![
                Warehouse {
                    id: "W1".into(),
                    annual_capacity: 80.0,
                    annual_fixed_cost: 1_000.0,
                },
                Warehouse {
                    id: "W2".into(),
                    annual_capacity: 50.0,
                    annual_fixed_cost: 700.0,
                },
            ],
        };
        let records = vec![
            LaneRecord::new("W1", "F1", 2.0),
            LaneRecord::new("W1", "F2", 3.0),
            LaneRecord::new("W2", "F1", 5.0),
            LaneRecord::new("W2", "F2", 1.0),
        ];
        let costs = CostMatrix::build(
            &records,
            &["W1".into(), "W2".into()],
            &["F1".into(), "F2".into()],
        )
        .unwrap();
        ModelBuilder::new(&data, &costs)
            .site_count(2)
            .budget_limit(budget)
            .build()
            .unwrap()
    }

    /// W1 serves F1 fully and 10 of F2, W2 serves the remaining 50 of F2.
    fn values(instance: &ModelInstance) -> Vec<f64> {
        let mut values = vec![0.0; instance.problem().num_vars()];
        values[instance.open_var(0)] = 1.0;
        values[instance.open_var(1)] = 1.0;
        values[instance.ship_var(0, 0)] = 40.0;
        values[instance.ship_var(0, 1)] = 10.0;
        values[instance.ship_var(1, 1)] = 50.0;
        values
    }

    // fixed 1_700, transport 40*2 + 10*3 + 50*1 = 160
    const TOTAL: f64 = 1_860.0;

    #[test]
    fn reports_costs_sites_and_shipments() {
        let instance = instance(2_000.0);
        let assignment = Assignment {
            values: values(&instance),
            objective: TOTAL,
        };

        let plan = extract_plan(&instance, &assignment).unwrap();

        assert_eq!(plan.costs.fixed, 1_700.0);
        assert_eq!(plan.costs.transport, 160.0);
        assert_eq!(plan.costs.total, TOTAL);
        assert_eq!(plan.budget_headroom, 140.0);
        assert_eq!(plan.open_count(), 2);
        assert_eq!(plan.shipments.len(), 3);
        assert_eq!(plan.shipments[1].cost, 30.0);
        assert_eq!(plan.received(&"F2".into()), 60.0);

        let w1 = plan.site(&"W1".into()).unwrap();
        assert_eq!(w1.shipped, 50.0);
        assert_eq!(w1.utilization, Some(50.0 / 80.0));
    }

    #[test]
    fn closed_site_has_no_utilization() {
        let instance = instance(2_000.0);
        let mut values = values(&instance);
        values[instance.open_var(1)] = 1e-9;
        values[instance.ship_var(1, 1)] = 0.0;
        let objective = instance.problem().objective.evaluate(&values);

        let plan = extract_plan(&instance, &Assignment { values, objective }).unwrap();

        let w2 = plan.site(&"W2".into()).unwrap();
        assert!(!w2.open);
        assert_eq!(w2.utilization, None);
        assert_eq!(plan.open_count(), 1);
    }

    #[test]
    fn floating_point_noise_is_not_a_shipment() {
        let instance = instance(2_000.0);
        let mut values = values(&instance);
        values[instance.ship_var(1, 0)] = 1e-9;
        let objective = instance.problem().objective.evaluate(&values);

        let plan = extract_plan(&instance, &Assignment { values, objective }).unwrap();

        assert_eq!(plan.shipments.len(), 3);
        assert!(plan
            .shipments
            .iter()
            .all(|s| !(s.warehouse.as_str() == "W2" && s.facility.as_str() == "F1")));
    }

    #[test]
    fn missing_solver_objective_falls_back_to_evaluation() {
        let instance = instance(2_000.0);
        let assignment = Assignment {
            values: values(&instance),
            objective: f64::NAN,
        };

        let plan = extract_plan(&instance, &assignment).unwrap();
        assert_eq!(plan.costs.total, TOTAL);
    }

    #[test]
    fn mismatched_total_fails_reconciliation() {
        let instance = instance(2_000.0);
        let assignment = Assignment {
            values: values(&instance),
            objective: TOTAL + 5.0,
        };

        let err = extract_plan(&instance, &assignment).unwrap_err();
        assert!(matches!(err, DomainError::Reconciliation { .. }));
    }

    #[test]
    fn negative_headroom_is_reported_not_hidden() {
        let instance = instance(1_000.0);
        let assignment = Assignment {
            values: values(&instance),
            objective: TOTAL,
        };

        let plan = extract_plan(&instance, &assignment).unwrap();
        assert_eq!(plan.budget_headroom, -860.0);
    }

    #[test]
    fn wrong_value_count_is_rejected() {
        let instance = instance(2_000.0);
        let assignment = Assignment {
            values: vec![1.0; 3],
            objective: TOTAL,
        };

        let err = extract_plan(&instance, &assignment).unwrap_err();
        assert_eq!(
            err,
            DomainError::AssignmentShape {
                expected: 6,
                actual: 3
            }
        );
    }
}
