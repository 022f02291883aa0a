//! Abstract mixed-integer linear program.
//!
//! Represents a minimization problem of the form:
//!
//! ```text
//! minimize    c^T * x
//! subject to  constraints
//!             bounds and integrality on x
//! ```

use serde::Serialize;

use super::constraint::{Constraint, LinearExpr, VariableDef, VariableKind};

/// Solver-agnostic MILP definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MilpProblem {
    /// Problem name for logs.
    pub name: String,
    /// Decision variables; their position is the index used in expressions.
    pub variables: Vec<VariableDef>,
    /// Objective to minimize.
    pub objective: LinearExpr,
    /// Linear constraints on the variables.
    pub constraints: Vec<Constraint>,
}

impl MilpProblem {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare a variable and return its index.
    pub fn add_variable(&mut self, variable: VariableDef) -> usize {
        self.variables.push(variable);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Return the number of decision variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Indices of binary variables.
    #[must_use]
    pub fn integer_vars(&self) -> Vec<usize> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, v)| v.kind == VariableKind::Binary)
            .map(|(i, _)| i)
            .collect()
    }

    /// Find a constraint by row name.
    #[must_use]
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }
}
