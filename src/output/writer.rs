//! CSV file writer
//!
//! Writes a header row followed by one row per record. Cells are looked up
//! by header name: a missing key is an empty cell and keys outside the
//! header set are ignored.

use super::headers::select_headers;
use crate::error::Result;
use crate::loader::FieldSelection;
use crate::types::{FieldSet, JsonValue, Record, RecordSet};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// CSV writer bound to a fixed header set
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
    headers: FieldSet,
    rows_written: usize,
}

impl CsvWriter<File> {
    /// Create the output file
    pub fn create(path: impl AsRef<Path>, headers: FieldSet) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::from_writer(file, headers))
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap any writer
    pub fn from_writer(inner: W, headers: FieldSet) -> Self {
        let writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(inner);

        Self {
            writer,
            headers,
            rows_written: 0,
        }
    }

    /// Columns this writer emits
    pub fn headers(&self) -> &FieldSet {
        &self.headers
    }

    /// Write the header row
    pub fn write_header(&mut self) -> Result<()> {
        if self.headers.is_empty() {
            return Ok(());
        }
        self.writer.write_record(&self.headers)?;
        Ok(())
    }

    /// Write one record, restricted to the header columns
    pub fn write(&mut self, record: &Record) -> Result<()> {
        if self.headers.is_empty() {
            return Ok(());
        }
        let row = self
            .headers
            .iter()
            .map(|header| record.get(header).map(render_cell).unwrap_or_default());
        self.writer.write_record(row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush and close the writer
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

/// Text written for a single cell
pub fn render_cell(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(_) | JsonValue::Object(_) => value.to_string(),
    }
}

/// Write a record set to a CSV file, returning the number of data rows.
///
/// When the selection leaves no columns the file is created but left
/// empty: no blank header row and no blank record lines are written, and
/// the returned row count is zero.
pub fn write_records(
    records: &RecordSet,
    selection: &FieldSelection,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let path = path.as_ref();
    let headers = select_headers(records, selection);
    if headers.is_empty() {
        warn!(
            "No columns left to write; {} will be empty",
            path.display()
        );
    }

    let mut writer = CsvWriter::create(path, headers)?;
    debug!(columns = ?writer.headers(), "Writing CSV to {}", path.display());
    writer.write_header()?;
    for record in records {
        writer.write(record)?;
    }
    writer.finish()
}
