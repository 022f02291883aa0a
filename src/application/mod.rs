//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod planner;
pub mod solve;

pub use planner::{prepare, PlanOutcome, Planner};
pub use solve::{solve_instance, SolveOutcome};
