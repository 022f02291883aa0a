//! Solver doubles for testing.
//!
//! - [`ScriptedSolver`] - Returns pre-loaded solutions in order.
//!   Best for: status classification, reconciliation failures.
//!
//! - [`RecordingSolver`] - Wraps another solver and counts calls.
//!   Best for: asserting that a solve did (or did not) happen.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::port::{MilpProblem, SolutionStatus, Solver, SolverSolution};

// ---------------------------------------------------------------------------
// ScriptedSolver
// ---------------------------------------------------------------------------

/// A solver that pops the next scripted result on each call.
///
/// When the script is exhausted every further call reports
/// [`SolutionStatus::Error`].
pub struct ScriptedSolver {
    results: Mutex<VecDeque<Result<SolverSolution>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSolver {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Script a single status with no values.
    pub fn with_status(self, status: SolutionStatus) -> Self {
        self.with_result(Ok(SolverSolution::with_status(status, None)))
    }

    /// Script an optimal solution.
    pub fn with_optimal(self, values: Vec<f64>, objective: f64) -> Self {
        self.with_result(Ok(SolverSolution::optimal(values, objective)))
    }

    /// Script a backend failure.
    pub fn with_failure(self, message: &str) -> Self {
        self.with_result(Err(Error::Solver(message.to_string())))
    }

    pub fn with_result(self, result: Result<SolverSolution>) -> Self {
        if let Ok(mut results) = self.results.lock() {
            results.push_back(result);
        }
        self
    }

    /// Shared call counter handle.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Default for ScriptedSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for ScriptedSolver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, _problem: &MilpProblem) -> Result<SolverSolution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .results
            .lock()
            .ok()
            .and_then(|mut results| results.pop_front());
        next.unwrap_or_else(|| {
            Ok(SolverSolution::with_status(
                SolutionStatus::Error,
                Some("script exhausted".to_string()),
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// RecordingSolver
// ---------------------------------------------------------------------------

/// Delegates to an inner solver and records every problem it was handed.
pub struct RecordingSolver<S> {
    inner: S,
    problems: Mutex<Vec<MilpProblem>>,
}

impl<S: Solver> RecordingSolver<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            problems: Mutex::new(Vec::new()),
        }
    }

    /// Number of solve calls so far.
    pub fn call_count(&self) -> usize {
        self.problems.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Problems received, in call order.
    pub fn problems(&self) -> Vec<MilpProblem> {
        self.problems.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl<S: Solver> Solver for RecordingSolver<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn solve(&self, problem: &MilpProblem) -> Result<SolverSolution> {
        if let Ok(mut problems) = self.problems.lock() {
            problems.push(problem.clone());
        }
        self.inner.solve(problem)
    }
}
