//! Engine types

/// Summary of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records found under the nesting path
    pub records_fetched: usize,
    /// Data rows written to the CSV (header excluded)
    pub rows_written: usize,
}
