//! Execution engine module
//!
//! Runs the request → decode → traverse → write pipeline.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Pipeline` - Fetches the configured endpoint and writes the CSV
//! - `RunStats` - What a run fetched and wrote

mod types;

pub use types::RunStats;

use crate::decode::{decode_body, traverse};
use crate::error::Result;
use crate::http::HttpClient;
use crate::loader::Configuration;
use crate::output::{merge_headers, write_records};
use crate::types::{FieldSet, RecordSet};
use std::path::Path;
use tracing::{debug, info};

/// Single-shot pipeline built from a configuration
#[derive(Debug)]
pub struct Pipeline {
    /// Resolved configuration
    config: Configuration,
    /// HTTP client carrying the credentials and certificate policy
    client: HttpClient,
}

impl Pipeline {
    /// Create a pipeline with a client derived from the configuration
    pub fn new(config: Configuration) -> Result<Self> {
        let client = HttpClient::from_configuration(&config)?;
        Ok(Self { config, client })
    }

    /// Create a pipeline with a custom client
    pub fn with_client(config: Configuration, client: HttpClient) -> Self {
        Self { config, client }
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Request the endpoint and return the records under the nesting path
    pub async fn fetch_records(&self) -> Result<RecordSet> {
        let body = self.client.get_text(self.config.url()).await?;
        debug!("Received {} bytes", body.len());

        let decoded = decode_body(&body)?;
        info!("Response decoded as {}", decoded.format);

        let target = traverse(decoded.value, self.config.nesting_path())?;
        RecordSet::from_value(target)
    }

    /// Request the endpoint and return every key found across its records,
    /// before any keep/discard selection
    pub async fn fetch_headers(&self) -> Result<FieldSet> {
        let records = self.fetch_records().await?;
        Ok(merge_headers(&records))
    }

    /// Write records to a CSV file using the configured column selection
    pub fn write(&self, records: &RecordSet, output: impl AsRef<Path>) -> Result<usize> {
        write_records(records, self.config.selection(), output)
    }

    /// Fetch and write in one go
    pub async fn run(&self, output: impl AsRef<Path>) -> Result<RunStats> {
        let records = self.fetch_records().await?;
        info!(
            "Data received ({} records), writing to {}",
            records.len(),
            output.as_ref().display()
        );

        let rows_written = self.write(&records, output)?;
        Ok(RunStats {
            records_fetched: records.len(),
            rows_written,
        })
    }
}

#[cfg(test)]
mod tests;
