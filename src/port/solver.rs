//! Solver port for mixed-integer linear programming.
//!
//! The planner is agnostic to which concrete MILP backend answers; anything
//! that can take a [`MilpProblem`] and return a status with variable values
//! plugs in here.

use std::fmt;

use serde::Serialize;

pub use crate::domain::MilpProblem;
use crate::error::Result;

/// Mixed-integer linear programming solver.
///
/// Implementations wrap specific solver backends (HiGHS, CBC, etc.) behind a
/// single blocking call. Any time limit is the implementation's own concern.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so independent
/// scenarios can be solved from different threads.
pub trait Solver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Solve a MILP, minimizing its objective.
    ///
    /// Infeasible and unbounded problems are reported through
    /// [`SolverSolution::status`], not as errors.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails in a way that
    /// leaves no status to report.
    fn solve(&self, problem: &MilpProblem) -> Result<SolverSolution>;
}

/// Raw answer from a solver backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSolution {
    /// Value of each variable, indexed like the problem's variables.
    ///
    /// Empty when the status is not optimal.
    pub values: Vec<f64>,

    /// Objective value at `values`; NaN when the status is not optimal.
    pub objective: f64,

    /// Termination status of the solver.
    pub status: SolutionStatus,

    /// Backend detail for non-optimal statuses.
    pub message: Option<String>,
}

impl SolverSolution {
    #[must_use]
    pub fn optimal(values: Vec<f64>, objective: f64) -> Self {
        Self {
            values,
            objective,
            status: SolutionStatus::Optimal,
            message: None,
        }
    }

    /// A solution carrying only a non-optimal status.
    #[must_use]
    pub fn with_status(status: SolutionStatus, message: Option<String>) -> Self {
        Self {
            values: Vec::new(),
            objective: f64::NAN,
            status,
            message,
        }
    }

    /// Return `true` if the solver found an optimal solution.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

/// Termination status of an optimization solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionStatus {
    /// Solver found a globally optimal solution.
    Optimal,

    /// No feasible solution exists.
    Infeasible,

    /// Objective function is unbounded.
    Unbounded,

    /// Solver encountered an internal error.
    Error,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Optimal => "Optimal",
            Self::Infeasible => "Infeasible",
            Self::Unbounded => "Unbounded",
            Self::Error => "SolverError",
        };
        f.write_str(label)
    }
}
