//! Header set construction

use crate::error::Result;
use crate::loader::FieldSelection;
use crate::types::{FieldSet, RecordSet};
use std::io::Write;

/// Separator line framing the `--headers` listing
pub const HEADER_RULE: &str = "--------------------";

/// Union of all record keys in first-occurrence order
pub fn merge_headers(records: &RecordSet) -> FieldSet {
    records.merged_keys()
}

/// Merged headers after the keep/discard selection
pub fn select_headers(records: &RecordSet, selection: &FieldSelection) -> FieldSet {
    selection.apply(&merge_headers(records))
}

/// Print the merged keys between separator lines
pub fn print_headers<W: Write>(out: &mut W, headers: &FieldSet) -> Result<()> {
    writeln!(out, "{HEADER_RULE}")?;
    writeln!(out, "Available Keys")?;
    writeln!(out, "{HEADER_RULE}")?;
    for header in headers {
        writeln!(out, "{header}")?;
    }
    writeln!(out, "{HEADER_RULE}")?;
    out.flush()?;
    Ok(())
}
