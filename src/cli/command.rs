//! Command-line interface definitions.
//!
//! Defines the CLI structure for the siteplan application using `clap`.
//! `solve` runs a planning scenario end to end; `check` runs the pre-solve
//! validations without touching a solver.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Capacitated warehouse site selection
#[derive(Parser, Debug)]
#[command(name = "siteplan")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the siteplan CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select sites and plan shipments for a scenario
    Solve(SolveArgs),

    /// Run validation checks without solving
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `siteplan check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
    /// Load input data and build the model, reporting its dimensions.
    Data(DataArgs),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for `siteplan check data`.
#[derive(Parser, Debug)]
pub struct DataArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Override the CSV data directory.
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Arguments for the `solve` subcommand.
///
/// Overrides apply on top of the configured scenario and are validated the
/// same way as configuration values.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Override the CSV data directory.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Override the annual budget limit.
    #[arg(long)]
    pub budget: Option<f64>,

    /// Override the number of sites to open.
    #[arg(long)]
    pub sites: Option<usize>,

    /// Write a network-map JSON document for the optimal plan.
    #[arg(long)]
    pub map: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_solve_overrides() {
        let cli = Cli::try_parse_from([
            "siteplan", "--json", "solve", "--budget", "500000", "--sites", "3",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Solve(args) => {
                assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG));
                assert_eq!(args.budget, Some(500_000.0));
                assert_eq!(args.sites, Some(3));
                assert!(args.map.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["siteplan", "check", "data", "-q", "-vv"]).unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Check(CheckCommand::Data(_))));
    }
}
