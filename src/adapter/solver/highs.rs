//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is a high-performance open-source linear/mixed-integer programming solver.
//! This implementation wraps it using the good_lp crate for ergonomic Rust usage.

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
};
use tracing::debug;

use crate::domain::{ConstraintSense, LinearExpr, VariableKind};
use crate::error::Result;
use crate::port::{MilpProblem, SolutionStatus, Solver, SolverSolution};

/// HiGHS-based MILP solver.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver;

impl HiGHSSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, problem: &MilpProblem) -> Result<SolverSolution> {
        solve_with_good_lp(problem)
    }
}

fn expression(vars: &[Variable], expr: &LinearExpr) -> Expression {
    expr.terms()
        .iter()
        .map(|&(i, coef)| coef * vars[i])
        .sum()
}

/// Internal solver implementation using good_lp.
fn solve_with_good_lp(problem: &MilpProblem) -> Result<SolverSolution> {
    let n = problem.num_vars();

    // Handle empty problem
    if n == 0 {
        return Ok(SolverSolution::optimal(vec![], 0.0));
    }

    let mut vars = variables!();
    let mut var_list = Vec::with_capacity(n);

    for def in &problem.variables {
        let mut v = variable();
        if let Some(lb) = def.bounds.lower {
            v = v.min(lb);
        }
        if let Some(ub) = def.bounds.upper {
            v = v.max(ub);
        }
        if def.kind == VariableKind::Binary {
            v = v.integer();
        }
        var_list.push(vars.add(v));
    }

    let objective = expression(&var_list, &problem.objective);
    let mut model = vars.minimise(objective).using(highs);

    for row in &problem.constraints {
        let lhs = expression(&var_list, &row.expr);
        let rhs = row.rhs;

        // An infinite ceiling (or floor) bounds nothing.
        let unbounded_row = match row.sense {
            ConstraintSense::LessEqual => rhs == f64::INFINITY,
            ConstraintSense::GreaterEqual => rhs == f64::NEG_INFINITY,
            ConstraintSense::Equal => false,
        };
        if unbounded_row {
            continue;
        }

        match row.sense {
            ConstraintSense::GreaterEqual => {
                model = model.with(constraint!(lhs >= rhs));
            }
            ConstraintSense::LessEqual => {
                model = model.with(constraint!(lhs <= rhs));
            }
            ConstraintSense::Equal => {
                model = model.with(constraint!(lhs == rhs));
            }
        }
    }

    debug!(
        problem = %problem.name,
        variables = n,
        constraints = problem.constraints.len(),
        "Invoking HiGHS"
    );

    match model.solve() {
        Ok(solution) => {
            let values: Vec<f64> = var_list.iter().map(|v| solution.value(*v)).collect();

            // Re-evaluate objective with the solved values
            let objective = problem.objective.evaluate(&values);

            Ok(SolverSolution::optimal(values, objective))
        }
        Err(ResolutionError::Infeasible) => Ok(SolverSolution::with_status(
            SolutionStatus::Infeasible,
            None,
        )),
        Err(ResolutionError::Unbounded) => Ok(SolverSolution::with_status(
            SolutionStatus::Unbounded,
            None,
        )),
        Err(other) => Ok(SolverSolution::with_status(
            SolutionStatus::Error,
            Some(other.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Constraint, VariableDef};

    fn expr(terms: &[(usize, f64)]) -> LinearExpr {
        terms.iter().copied().collect()
    }

    #[test]
    fn test_solver_name() {
        let solver = HiGHSSolver::new();
        assert_eq!(solver.name(), "highs");
    }

    #[test]
    fn test_simple_lp() {
        // Minimize: x + 2y
        // Subject to: x + y >= 1
        //            x, y >= 0
        let solver = HiGHSSolver::new();

        let mut problem = MilpProblem::new("simple");
        let x = problem.add_variable(VariableDef::non_negative("x"));
        let y = problem.add_variable(VariableDef::non_negative("y"));
        problem.objective = expr(&[(x, 1.0), (y, 2.0)]);
        problem.add_constraint(Constraint::geq("cover", expr(&[(x, 1.0), (y, 1.0)]), 1.0));

        let solution = solver.solve(&problem).unwrap();

        assert!(solution.is_optimal());
        assert!((solution.values[x] - 1.0).abs() < 1e-6);
        assert!((solution.objective - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_binary_milp() {
        // Minimize: 3a + 2b
        // Subject to: a + b = 1
        //            a, b in {0, 1}
        let solver = HiGHSSolver::new();

        let mut problem = MilpProblem::new("binary");
        let a = problem.add_variable(VariableDef::binary("a"));
        let b = problem.add_variable(VariableDef::binary("b"));
        problem.objective = expr(&[(a, 3.0), (b, 2.0)]);
        problem.add_constraint(Constraint::eq("pick_one", expr(&[(a, 1.0), (b, 1.0)]), 1.0));

        let solution = solver.solve(&problem).unwrap();

        assert!(solution.is_optimal());
        assert!(solution.values[a] < 0.5);
        assert!(solution.values[b] > 0.5);
    }

    #[test]
    fn test_infeasible_problem() {
        // x <= 1 and x >= 2
        let solver = HiGHSSolver::new();

        let mut problem = MilpProblem::new("infeasible");
        let x = problem.add_variable(VariableDef::non_negative("x"));
        problem.objective = expr(&[(x, 1.0)]);
        problem.add_constraint(Constraint::leq("upper", expr(&[(x, 1.0)]), 1.0));
        problem.add_constraint(Constraint::geq("lower", expr(&[(x, 1.0)]), 2.0));

        let solution = solver.solve(&problem).unwrap();

        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.values.is_empty());
    }

    #[test]
    fn test_infinite_ceiling_is_ignored() {
        let solver = HiGHSSolver::new();

        let mut problem = MilpProblem::new("ceiling");
        let x = problem.add_variable(VariableDef::non_negative("x"));
        problem.objective = expr(&[(x, 1.0)]);
        problem.add_constraint(Constraint::geq("floor", expr(&[(x, 1.0)]), 3.0));
        problem.add_constraint(Constraint::leq("budget", expr(&[(x, 1.0)]), f64::INFINITY));

        let solution = solver.solve(&problem).unwrap();

        assert!(solution.is_optimal());
        assert!((solution.values[x] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_problem() {
        let solver = HiGHSSolver::new();
        let solution = solver.solve(&MilpProblem::new("empty")).unwrap();

        assert!(solution.is_optimal());
        assert!(solution.values.is_empty());
    }
}
