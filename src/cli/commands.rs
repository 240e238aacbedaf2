//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Send an authenticated HTTP request expecting an XML or JSON response and
/// transform the records in it into a CSV file
#[derive(Parser, Debug)]
#[command(name = "request-to-csv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The configuration file
    #[arg(value_name = "config_file")]
    pub config: PathBuf,

    /// The path of the output CSV file
    #[arg(value_name = "output_file_path")]
    pub output: PathBuf,

    /// Make the request and print the available column headers to stdout
    /// instead of writing the CSV
    #[arg(long)]
    pub headers: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
