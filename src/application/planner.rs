//! End-to-end planning pipeline.
//!
//! ```text
//! records ─► normalize ─► CostMatrix ─► ModelBuilder ─► solve_instance ─► extract_plan
//! ```
//!
//! Every data-integrity check runs in [`Planner::prepare`], so no partial
//! model ever reaches the solver.

use std::sync::Arc;

use tracing::{debug, info};

use super::solve::{solve_instance, SolveOutcome};
use crate::domain::{
    extract_plan, normalize, CostMatrix, ModelBuilder, ModelInstance, Plan, RecordSet, Scenario,
};
use crate::error::Result;
use crate::port::{SolutionStatus, Solver};

/// Result of a planning run.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Optimal plan.
    Planned(Plan),
    /// The solver ended without an optimal solution.
    Unsolved {
        status: SolutionStatus,
        detail: Option<String>,
    },
}

impl PlanOutcome {
    #[must_use]
    pub fn status(&self) -> SolutionStatus {
        match self {
            Self::Planned(_) => SolutionStatus::Optimal,
            Self::Unsolved { status, .. } => *status,
        }
    }

    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Planned(plan) => Some(plan),
            Self::Unsolved { .. } => None,
        }
    }
}

/// Normalize records, build the cost matrix and assemble the model.
///
/// Runs every pre-solve check; no solver is involved.
///
/// # Errors
///
/// Returns the first data-integrity or construction error.
pub fn prepare(records: &RecordSet, scenario: &Scenario) -> Result<ModelInstance> {
    let data = normalize(&records.facilities, &records.warehouses, scenario)?;
    debug!(
        facilities = data.facilities.len(),
        warehouses = data.warehouses.len(),
        total_demand = data.total_demand(),
        total_capacity = data.total_capacity(),
        "Entities normalized"
    );

    let costs = CostMatrix::build(
        &records.lanes,
        &scenario.target_warehouses,
        &scenario.target_facilities,
    )?;
    debug!(lanes = costs.len(), "Cost matrix built");

    let instance = ModelBuilder::from_scenario(&data, &costs, scenario).build()?;
    Ok(instance)
}

/// Runs scenarios against an injected solver.
///
/// Each call builds its own fresh instance; nothing is shared between runs.
#[derive(Clone)]
pub struct Planner {
    solver: Arc<dyn Solver>,
}

impl Planner {
    pub fn new(solver: Arc<dyn Solver>) -> Self {
        Self { solver }
    }

    #[must_use]
    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    /// See [`prepare`].
    ///
    /// # Errors
    ///
    /// Returns the first data-integrity or construction error.
    pub fn prepare(&self, records: &RecordSet, scenario: &Scenario) -> Result<ModelInstance> {
        prepare(records, scenario)
    }

    /// Prepare, solve once, and extract the plan.
    ///
    /// # Errors
    ///
    /// Returns data-integrity errors before any solve, and
    /// reconciliation errors after an optimal solve. Non-optimal solver
    /// statuses are an [`PlanOutcome::Unsolved`] value, not an error.
    pub fn plan(&self, records: &RecordSet, scenario: &Scenario) -> Result<PlanOutcome> {
        let instance = self.prepare(records, scenario)?;
        self.solve_prepared(&instance)
    }

    /// Solve an already prepared instance and extract the plan.
    ///
    /// # Errors
    ///
    /// Returns a reconciliation or shape error if the optimal assignment does
    /// not match the instance.
    pub fn solve_prepared(&self, instance: &ModelInstance) -> Result<PlanOutcome> {
        let assignment = match solve_instance(instance, self.solver.as_ref()) {
            SolveOutcome::Optimal(assignment) => assignment,
            other => {
                let status = other.status();
                let detail = match other {
                    SolveOutcome::SolverError(message) => Some(message),
                    _ => None,
                };
                return Ok(PlanOutcome::Unsolved { status, detail });
            }
        };

        let plan = extract_plan(instance, &assignment)?;
        info!(
            open_sites = plan.open_count(),
            total_cost = plan.costs.total,
            fixed_cost = plan.costs.fixed,
            transport_cost = plan.costs.transport,
            budget_headroom = plan.budget_headroom,
            "Plan extracted"
        );
        Ok(PlanOutcome::Planned(plan))
    }
}
