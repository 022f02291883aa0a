//! Linear model primitives shared by the model builder and solver port.
//!
//! Expressions are sparse: only non-zero terms are stored, keyed by variable
//! index into the owning problem's variable list.

use serde::{Deserialize, Serialize};

/// Sparse linear expression `sum(coef * x[var])`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearExpr {
    terms: Vec<(usize, f64)>,
}

impl LinearExpr {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term. Zero coefficients are skipped.
    pub fn add_term(&mut self, var: usize, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push((var, coefficient));
        }
    }

    #[must_use]
    pub fn with_term(mut self, var: usize, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    /// Variable index and coefficient pairs.
    #[must_use]
    pub fn terms(&self) -> &[(usize, f64)] {
        &self.terms
    }

    /// Evaluate at the given variable values.
    ///
    /// Indices beyond `values` contribute nothing.
    #[must_use]
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values.get(var).copied().unwrap_or(0.0))
            .sum()
    }
}

impl FromIterator<(usize, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        let mut expr = Self::new();
        for (var, coef) in iter {
            expr.add_term(var, coef);
        }
        expr
    }
}

/// A single named linear constraint: `expr {>=, <=, =} rhs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    /// Row name, e.g. `demand[DORM_A]`.
    pub name: String,
    pub expr: LinearExpr,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

impl Constraint {
    /// Create a >= constraint.
    #[must_use]
    pub fn geq(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= constraint.
    #[must_use]
    pub fn leq(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Create an = constraint.
    #[must_use]
    pub fn eq(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }

    /// Check the constraint at `values` with an absolute tolerance.
    #[must_use]
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            ConstraintSense::GreaterEqual => lhs >= self.rhs - tolerance,
            ConstraintSense::LessEqual => lhs <= self.rhs + tolerance,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

/// Integrality of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    /// 0/1 decision.
    Binary,
    /// Real-valued within its bounds.
    Continuous,
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<f64>,
    /// Upper bound (None = +infinity).
    pub upper: Option<f64>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(0.0),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: Some(0.0),
            upper: Some(1.0),
        }
    }

    /// Non-negative variable [0, +inf).
    #[must_use]
    pub fn non_negative() -> Self {
        Self::default()
    }

    /// Bounded variable [lower, upper].
    #[must_use]
    pub const fn bounded(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

/// A declared decision variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDef {
    /// Display name, e.g. `open[WH_NORTH]`.
    pub name: String,
    pub kind: VariableKind,
    pub bounds: VariableBounds,
}

impl VariableDef {
    #[must_use]
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Binary,
            bounds: VariableBounds::binary(),
        }
    }

    #[must_use]
    pub fn non_negative(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Continuous,
            bounds: VariableBounds::non_negative(),
        }
    }
}
