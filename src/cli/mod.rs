//! CLI module graph.

pub mod check;
pub mod command;
pub mod load;
pub mod output;
pub mod solve;

pub use command::{CheckCommand, Cli, ColorChoice, Commands};
