//! request-to-csv CLI
//!
//! Runs the pipeline once and maps failures to exit codes.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use request_to_csv::cli::{Cli, Runner};
use request_to_csv::USAGE_EXIT_CODE;
use std::process::ExitCode;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // No arguments at all: show help and stop
    if std::env::args_os().len() <= 1 {
        // Nothing useful can be done if stdout is gone
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(USAGE_EXIT_CODE),
            };
        }
    };

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);
    match runner.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}. Exiting.");
            ExitCode::from(e.exit_code())
        }
    }
}
