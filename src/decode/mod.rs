//! Response decoder module
//!
//! Supports: XML, JSON
//!
//! # Overview
//!
//! The body of the response is classified by trying XML first and JSON
//! second. Both formats end up as a `serde_json::Value` tree, which the
//! nesting path is then walked through to reach the record list.

mod decoders;
mod types;
mod xml;

pub use decoders::{decode_body, is_json, is_xml, traverse};
pub use types::{Decoded, ResponseFormat};
pub use xml::{xml_to_json, ATTRIBUTE_PREFIX, TEXT_KEY};
