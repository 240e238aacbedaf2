//! CLI module
//!
//! Command-line interface for running the pipeline.
//!
//! ```text
//! request-to-csv <config_file> <output_file_path> [--headers]
//! ```

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
