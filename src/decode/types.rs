//! Decoder types

use crate::types::JsonValue;

/// Format the response body was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Well-formed XML document
    Xml,
    /// JSON document
    Json,
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseFormat::Xml => f.write_str("XML"),
            ResponseFormat::Json => f.write_str("JSON"),
        }
    }
}

/// A classified and parsed response body
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Which parser accepted the body
    pub format: ResponseFormat,
    /// The parsed tree
    pub value: JsonValue,
}
