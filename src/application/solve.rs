//! Solve orchestration: one solver call, classified. No retries.

use std::time::Instant;

use tracing::{info, warn};

use crate::domain::{Assignment, ModelInstance};
use crate::port::{SolutionStatus, Solver};

/// Classified result of a single solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Optimal values, ready for result extraction.
    Optimal(Assignment),
    Infeasible,
    Unbounded,
    /// Backend failure, with its message.
    SolverError(String),
}

impl SolveOutcome {
    #[must_use]
    pub fn status(&self) -> SolutionStatus {
        match self {
            Self::Optimal(_) => SolutionStatus::Optimal,
            Self::Infeasible => SolutionStatus::Infeasible,
            Self::Unbounded => SolutionStatus::Unbounded,
            Self::SolverError(_) => SolutionStatus::Error,
        }
    }

    #[must_use]
    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal(_))
    }

    /// The optimal assignment, if any.
    #[must_use]
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Optimal(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Invoke `solver` once on the instance's problem and classify the result.
///
/// Non-optimal statuses carry no assignment, so no partial plan can be
/// extracted from them.
pub fn solve_instance(instance: &ModelInstance, solver: &dyn Solver) -> SolveOutcome {
    let start = Instant::now();
    let result = solver.solve(instance.problem());
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let outcome = match result {
        Ok(solution) => match solution.status {
            SolutionStatus::Optimal => SolveOutcome::Optimal(Assignment {
                values: solution.values,
                objective: solution.objective,
            }),
            SolutionStatus::Infeasible => SolveOutcome::Infeasible,
            SolutionStatus::Unbounded => SolveOutcome::Unbounded,
            SolutionStatus::Error => SolveOutcome::SolverError(
                solution
                    .message
                    .unwrap_or_else(|| "solver reported an error".to_string()),
            ),
        },
        Err(e) => SolveOutcome::SolverError(e.to_string()),
    };

    match &outcome {
        SolveOutcome::SolverError(message) => warn!(
            solver = solver.name(),
            elapsed_ms,
            error = %message,
            "Solver failed"
        ),
        other => info!(
            solver = solver.name(),
            status = %other.status(),
            elapsed_ms,
            "Solve finished"
        ),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CostMatrix, Facility, LaneRecord, ModelBuilder, NormalizedData, Warehouse};
    use crate::error::{Error, Result};
    use crate::port::{MilpProblem, SolverSolution};

    struct FixedSolver(SolverSolution);

    impl Solver for FixedSolver {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn solve(&self, _problem: &MilpProblem) -> Result<SolverSolution> {
            Ok(self.0.clone())
        }
    }

    struct FailingSolver;

    impl Solver for FailingSolver {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn solve(&self, _problem: &MilpProblem) -> Result<SolverSolution> {
            Err(Error::Solver("backend crashed".into()))
        }
    }

    fn instance() -> ModelInstance {
        let data = NormalizedData {
            facilities: vec![Facility {
                id: "F1".into(),
                annual_demand: 10.0,
            }],
            warehouses: vec![Warehouse {
                id: "W1".into(),
                annual_capacity: 20.0,
                annual_fixed_cost: 5.0,
            }],
        };
        let costs = CostMatrix::build(
            &[LaneRecord::new("W1", "F1", 1.0)],
            &["W1".into()],
            &["F1".into()],
        )
        .unwrap();
        ModelBuilder::new(&data, &costs).site_count(1).build().unwrap()
    }

    #[test]
    fn optimal_status_carries_assignment() {
        let solver = FixedSolver(SolverSolution::optimal(vec![1.0, 10.0], 15.0));

        let outcome = solve_instance(&instance(), &solver);

        assert!(outcome.is_optimal());
        assert_eq!(outcome.assignment().unwrap().objective, 15.0);
    }

    #[test]
    fn infeasible_status_has_no_assignment() {
        let solver = FixedSolver(SolverSolution::with_status(SolutionStatus::Infeasible, None));

        let outcome = solve_instance(&instance(), &solver);

        assert_eq!(outcome, SolveOutcome::Infeasible);
        assert!(outcome.assignment().is_none());
    }

    #[test]
    fn unbounded_is_classified() {
        let solver = FixedSolver(SolverSolution::with_status(SolutionStatus::Unbounded, None));
        assert_eq!(
            solve_instance(&instance(), &solver).status(),
            SolutionStatus::Unbounded
        );
    }

    #[test]
    fn backend_error_becomes_solver_error() {
        let outcome = solve_instance(&instance(), &FailingSolver);

        assert_eq!(outcome.status(), SolutionStatus::Error);
        assert!(matches!(outcome, SolveOutcome::SolverError(msg) if msg.contains("backend crashed")));
    }

    #[test]
    fn error_status_keeps_backend_message() {
        let solver = FixedSolver(SolverSolution::with_status(
            SolutionStatus::Error,
            Some("time limit reached".into()),
        ));

        let outcome = solve_instance(&instance(), &solver);

        assert_eq!(outcome, SolveOutcome::SolverError("time limit reached".into()));
    }
}
