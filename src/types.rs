//! Common types used throughout request-to-csv
//!
//! Records keep the key order of the response (serde_json is built with
//! `preserve_order`), which is what gives the CSV its column order.

use crate::error::{Error, Result};
use indexmap::IndexSet;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One flattenable unit of the response; becomes one CSV row
pub type Record = JsonObject;

/// Ordered set of unique field names
pub type FieldSet = IndexSet<String>;

// ============================================================================
// Record Set
// ============================================================================

/// Ordered sequence of records reached by following the nesting path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Create a record set from already-validated records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Build a record set from the node the nesting path points at.
    ///
    /// An array must contain only objects. A lone object is a single record,
    /// which is what XML with one repeated element converts to.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Array(items) => {
                let records = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        JsonValue::Object(record) => Ok(record),
                        other => Err(Error::invalid_record(format!(
                            "element {index} is {}, expected an object",
                            kind_of(&other)
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self { records })
            }
            JsonValue::Object(record) => Ok(Self {
                records: vec![record],
            }),
            other => Err(Error::invalid_record(format!(
                "nesting target is {}, expected a list of objects",
                kind_of(&other)
            ))),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in response order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Union of every record's keys, in first-occurrence order
    pub fn merged_keys(&self) -> FieldSet {
        self.records
            .iter()
            .flat_map(|record| record.keys().cloned())
            .collect()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
