//! # request-to-csv
//!
//! Fetch an authenticated HTTP endpoint that answers in XML or JSON, walk
//! down to the list of records inside the response and write them as CSV.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use request_to_csv::{engine::Pipeline, loader::load_configuration, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = load_configuration("settings.ini")?;
//!     let pipeline = Pipeline::new(config)?;
//!     let stats = pipeline.run("out.csv").await?;
//!     println!("{} rows", stats.rows_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────────────────┐   ┌──────────────┐
//! │    Loader    │ → │            Fetcher            │ → │    Output    │
//! ├──────────────┤   ├──────────┬─────────┬──────────┤   ├──────────────┤
//! │ INI sections │   │ GET +    │ XML or  │ nesting  │   │ header merge │
//! │ field lists  │   │ Basic    │ JSON    │ path     │   │ keep/discard │
//! │ validation   │   │ auth     │ sniff   │ walk     │   │ CSV writer   │
//! └──────────────┘   └──────────┴─────────┴──────────┘   └──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and exit codes
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration file loading
pub mod loader;

/// Authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Response decoders (XML, JSON) and nesting path traversal
pub mod decode;

/// CSV output
pub mod output;

/// Pipeline orchestration
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, USAGE_EXIT_CODE};
pub use types::*;

pub use engine::Pipeline;
pub use loader::{load_configuration, load_configuration_from_str, Configuration};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
