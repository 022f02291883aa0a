use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use siteplan::cli::check::{config::execute_config, data::execute_data};
use siteplan::cli::output::{self, OutputConfig};
use siteplan::cli::{solve, CheckCommand, Cli, ColorChoice, Commands};
use siteplan::port::SolutionStatus;
use tracing::error;

/// Exit code when the solve ends without an optimal plan.
const EXIT_NOT_OPTIMAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !cli.json && std::io::stdout().is_terminal(),
    };
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose, color));

    let result = match &cli.command {
        Commands::Solve(args) => solve::execute(args).map(status_exit_code),
        Commands::Check(CheckCommand::Config(args)) => {
            execute_config(&args.config).map(|()| ExitCode::SUCCESS)
        }
        Commands::Check(CheckCommand::Data(args)) => {
            execute_data(args).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn status_exit_code(status: SolutionStatus) -> ExitCode {
    match status {
        SolutionStatus::Optimal => ExitCode::SUCCESS,
        _ => ExitCode::from(EXIT_NOT_OPTIMAL),
    }
}
