//! Validation command handlers.

pub mod config;
pub mod data;
