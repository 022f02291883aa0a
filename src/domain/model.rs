//! Model builder: normalized data to a fixed-charge facility-location MILP.
//!
//! ```text
//! minimize    Σ_w F_w · open_w + Σ_w Σ_f c_wf · ship_wf
//!
//! subject to:
//!   Σ_w ship_wf = D_f                 demand[f]      every facility
//!   Σ_f ship_wf ≤ C_w · open_w        capacity[w]    every warehouse
//!   Σ_w open_w = K                    site_count
//!   objective ≤ B                     budget
//!   open_w ∈ {0,1},  ship_wf ≥ 0
//! ```
//!
//! The capacity row is the fixed-charge link: a closed site has a zero
//! right-hand side, so nothing can ship from it.

use tracing::debug;

use super::constraint::{Constraint, LinearExpr, VariableDef};
use super::cost_matrix::CostMatrix;
use super::error::{DomainError, Infeasibility};
use super::normalize::NormalizedData;
use super::problem::MilpProblem;
use super::scenario::Scenario;

/// Relative slack when comparing total demand to reachable capacity.
const CAPACITY_TOLERANCE: f64 = 1e-9;

/// An assembled, immutable planning model.
///
/// Owns copies of the data it was built from so the result extractor can
/// interpret a solution without the caller threading inputs back in.
/// Parameters never change after construction; build a new instance instead.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    problem: MilpProblem,
    data: NormalizedData,
    costs: CostMatrix,
    site_count: usize,
    budget_limit: f64,
}

impl ModelInstance {
    /// The MILP handed to a solver.
    #[must_use]
    pub fn problem(&self) -> &MilpProblem {
        &self.problem
    }

    #[must_use]
    pub fn data(&self) -> &NormalizedData {
        &self.data
    }

    #[must_use]
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    #[must_use]
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    #[must_use]
    pub fn budget_limit(&self) -> f64 {
        self.budget_limit
    }

    /// Variable index of `open[w]` for the warehouse at position `w`.
    #[must_use]
    pub fn open_var(&self, warehouse: usize) -> usize {
        warehouse
    }

    /// Variable index of `ship[w,f]` for warehouse `w` and facility `f`.
    #[must_use]
    pub fn ship_var(&self, warehouse: usize, facility: usize) -> usize {
        ship_index(
            self.data.warehouses.len(),
            self.data.facilities.len(),
            warehouse,
            facility,
        )
    }
}

fn ship_index(n_warehouses: usize, n_facilities: usize, warehouse: usize, facility: usize) -> usize {
    n_warehouses + warehouse * n_facilities + facility
}

/// Builder for [`ModelInstance`].
///
/// Borrows its inputs; building never mutates them.
#[derive(Debug, Clone)]
pub struct ModelBuilder<'a> {
    data: &'a NormalizedData,
    costs: &'a CostMatrix,
    site_count: usize,
    budget_limit: f64,
}

impl<'a> ModelBuilder<'a> {
    /// Start a builder with K = 2 and an unlimited budget.
    #[must_use]
    pub fn new(data: &'a NormalizedData, costs: &'a CostMatrix) -> Self {
        Self {
            data,
            costs,
            site_count: 2,
            budget_limit: f64::INFINITY,
        }
    }

    /// Start a builder with the scenario's cardinality and budget.
    #[must_use]
    pub fn from_scenario(
        data: &'a NormalizedData,
        costs: &'a CostMatrix,
        scenario: &Scenario,
    ) -> Self {
        Self::new(data, costs)
            .site_count(scenario.site_count)
            .budget_limit(scenario.budget_limit)
    }

    #[must_use]
    pub fn site_count(mut self, site_count: usize) -> Self {
        self.site_count = site_count;
        self
    }

    #[must_use]
    pub fn budget_limit(mut self, budget_limit: f64) -> Self {
        self.budget_limit = budget_limit;
        self
    }

    /// Assemble the MILP.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InfeasibleByConstruction`] if K exceeds the candidate
    ///   count or the K largest capacities cannot cover total demand
    /// - [`DomainError::MissingLane`] if the cost matrix lacks a pair
    pub fn build(self) -> Result<ModelInstance, DomainError> {
        self.check_feasible_by_construction()?;

        let warehouses = &self.data.warehouses;
        let facilities = &self.data.facilities;
        let (n_w, n_f) = (warehouses.len(), facilities.len());

        let mut problem = MilpProblem::new("warehouse_site_selection");

        for warehouse in warehouses {
            problem.add_variable(VariableDef::binary(format!("open[{}]", warehouse.id)));
        }
        let mut unit_costs = Vec::with_capacity(n_w * n_f);
        for warehouse in warehouses {
            for facility in facilities {
                let cost = self.costs.get(&warehouse.id, &facility.id).ok_or_else(|| {
                    DomainError::MissingLane {
                        warehouse: warehouse.id.clone(),
                        facility: facility.id.clone(),
                    }
                })?;
                unit_costs.push(cost);
                problem.add_variable(VariableDef::non_negative(format!(
                    "ship[{},{}]",
                    warehouse.id, facility.id
                )));
            }
        }

        let mut total_cost = LinearExpr::new();
        for (w, warehouse) in warehouses.iter().enumerate() {
            total_cost.add_term(w, warehouse.annual_fixed_cost);
        }
        for w in 0..n_w {
            for f in 0..n_f {
                total_cost.add_term(ship_index(n_w, n_f, w, f), unit_costs[w * n_f + f]);
            }
        }

        for (f, facility) in facilities.iter().enumerate() {
            let received: LinearExpr = (0..n_w).map(|w| (ship_index(n_w, n_f, w, f), 1.0)).collect();
            problem.add_constraint(Constraint::eq(
                format!("demand[{}]", facility.id),
                received,
                facility.annual_demand,
            ));
        }

        for (w, warehouse) in warehouses.iter().enumerate() {
            let mut shipped: LinearExpr =
                (0..n_f).map(|f| (ship_index(n_w, n_f, w, f), 1.0)).collect();
            shipped.add_term(w, -warehouse.annual_capacity);
            problem.add_constraint(Constraint::leq(
                format!("capacity[{}]", warehouse.id),
                shipped,
                0.0,
            ));
        }

        let opened: LinearExpr = (0..n_w).map(|w| (w, 1.0)).collect();
        problem.add_constraint(Constraint::eq("site_count", opened, self.site_count as f64));

        problem.add_constraint(Constraint::leq(
            "budget",
            total_cost.clone(),
            self.budget_limit,
        ));
        problem.objective = total_cost;

        debug!(
            variables = problem.num_vars(),
            constraints = problem.constraints.len(),
            site_count = self.site_count,
            budget_limit = self.budget_limit,
            "Model assembled"
        );

        Ok(ModelInstance {
            problem,
            data: self.data.clone(),
            costs: self.costs.clone(),
            site_count: self.site_count,
            budget_limit: self.budget_limit,
        })
    }

    fn check_feasible_by_construction(&self) -> Result<(), DomainError> {
        let candidates = self.data.warehouses.len();
        if self.site_count > candidates {
            return Err(DomainError::InfeasibleByConstruction(
                Infeasibility::SiteCountExceedsCandidates {
                    site_count: self.site_count,
                    candidates,
                },
            ));
        }

        let mut capacities: Vec<f64> = self
            .data
            .warehouses
            .iter()
            .map(|w| w.annual_capacity)
            .collect();
        capacities.sort_by(|a, b| b.total_cmp(a));
        let best_capacity: f64 = capacities.iter().take(self.site_count).sum();
        let total_demand = self.data.total_demand();

        if best_capacity + CAPACITY_TOLERANCE * total_demand.max(1.0) < total_demand {
            return Err(DomainError::InfeasibleByConstruction(
                Infeasibility::InsufficientCapacity {
                    site_count: self.site_count,
                    total_demand,
                    best_capacity,
                },
            ));
        }
        Ok(())
    }
}
