//! Siteplan - Capacitated warehouse site selection.
//!
//! Chooses which candidate warehouses to open and how much each one ships to
//! each facility, so that every facility's annual demand is met, no open
//! site exceeds its capacity, exactly `K` sites open, and total annual cost
//! (amortized construction plus operations plus transport) is minimal and
//! within budget.
//!
//! # Architecture
//!
//! - **`domain`** - Entity normalization, cost matrix, model construction and
//!   plan extraction. Pure and solver-agnostic.
//! - **`port`** - The [`Solver`](port::Solver) capability and the abstract
//!   MILP it consumes.
//! - **`adapter`** - HiGHS via good_lp, CSV record loading, network-map
//!   export.
//! - **`application`** - Solve orchestration and the end-to-end planner.
//!
//! # Modules
//!
//! - [`domain`] - Ids, records, normalizer, cost matrix, model builder, plan
//! - [`port`] - Solver trait and problem/solution types
//! - [`adapter`] - Solver backend, input and output adapters
//! - [`application`] - `Planner` and `solve_instance`
//! - [`infrastructure`] - Configuration and logging
//! - [`cli`] - Command tree and terminal output
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use siteplan::adapter::input::CsvRecordSource;
//! use siteplan::adapter::solver::HiGHSSolver;
//! use siteplan::application::{PlanOutcome, Planner};
//! use siteplan::infrastructure::config::Config;
//!
//! fn main() -> siteplan::error::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     let records = CsvRecordSource::new(&config.data.dir).load()?;
//!     let planner = Planner::new(Arc::new(HiGHSSolver::new()));
//!
//!     if let PlanOutcome::Planned(plan) = planner.plan(&records, &config.scenario)? {
//!         println!("total annual cost: {:.2}", plan.costs.total);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
