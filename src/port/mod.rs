//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`Solver`] - MILP optimization backend

mod solver;

pub use solver::{MilpProblem, SolutionStatus, Solver, SolverSolution};
