//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`solver`] - [`Solver`](crate::port::Solver) doubles: `ScriptedSolver`,
//!   `RecordingSolver`.
//! - [`domain`] - The reference campus scenario and record builders.

pub mod domain;
pub mod solver;
