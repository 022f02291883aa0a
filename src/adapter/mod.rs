//! Implementations of ports and external hand-offs (hexagonal adapters).

pub mod input;
pub mod output;
pub mod solver;
