//! Format detection and tree traversal

use super::types::{Decoded, ResponseFormat};
use super::xml::xml_to_json;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use tracing::debug;

/// Classify and parse a response body.
///
/// XML is tried first, so text accepted by both parsers is XML. Parse
/// errors only mean "not this format" and are never surfaced.
pub fn decode_body(body: &str) -> Result<Decoded> {
    match xml_to_json(body) {
        Ok(value) => {
            debug!("Response is valid XML");
            return Ok(Decoded {
                format: ResponseFormat::Xml,
                value,
            });
        }
        Err(e) => debug!("Response is not XML: {e}"),
    }

    match serde_json::from_str::<JsonValue>(body) {
        Ok(value) => {
            debug!("Response is valid JSON");
            Ok(Decoded {
                format: ResponseFormat::Json,
                value,
            })
        }
        Err(e) => {
            debug!("Response is not JSON: {e}");
            Err(Error::UnrecognizedFormat)
        }
    }
}

/// Whether the text is a well-formed XML document
pub fn is_xml(text: &str) -> bool {
    xml_to_json(text).is_ok()
}

/// Whether the text is a valid JSON document
pub fn is_json(text: &str) -> bool {
    serde_json::from_str::<JsonValue>(text).is_ok()
}

/// Walk a sequence of keys down from the root.
///
/// Objects are indexed by key. Arrays are indexed by a segment that parses
/// as a position. The first segment that cannot be followed is reported.
pub fn traverse<S: AsRef<str>>(root: JsonValue, path: &[S]) -> Result<JsonValue> {
    let mut current = root;

    for segment in path {
        let key = segment.as_ref();
        current = match current {
            JsonValue::Object(mut map) => map.remove(key),
            JsonValue::Array(mut items) => key
                .parse::<usize>()
                .ok()
                .filter(|&index| index < items.len())
                .map(|index| items.swap_remove(index)),
            _ => None,
        }
        .ok_or_else(|| Error::missing_node(key))?;
        debug!("Descended into \"{key}\"");
    }

    Ok(current)
}
