//! Output module
//!
//! Turns a record set into CSV.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Merging record keys into an ordered header set
//! - Applying the keep/discard column selection
//! - Printing the available keys for `--headers`
//! - Writing the CSV file

mod headers;
mod writer;

pub use headers::{merge_headers, print_headers, select_headers, HEADER_RULE};
pub use writer::{render_cell, write_records, CsvWriter};
