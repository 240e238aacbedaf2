//! Configuration file parser
//!
//! Reads the `REQUEST`, `KEEP_FIELDS`, `DISCARD_FIELDS` and `NESTING`
//! sections. Field lists are JSON arrays of strings stored as INI values.

use super::ini::IniDocument;
use super::types::Configuration;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Section holding the endpoint and credentials
pub const REQUEST_SECTION: &str = "REQUEST";
/// Section holding the column allow-list
pub const KEEP_SECTION: &str = "KEEP_FIELDS";
/// Section holding the column deny-list
pub const DISCARD_SECTION: &str = "DISCARD_FIELDS";
/// Section holding the nesting path
pub const NESTING_SECTION: &str = "NESTING";

const FIELDS_KEY: &str = "fields";

/// Load a configuration from a file path
///
/// # Examples
///
/// ```ignore
/// let config = load_configuration("settings.ini")?;
/// println!("requesting {}", config.url());
/// ```
pub fn load_configuration(path: impl AsRef<Path>) -> Result<Configuration> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::ConfigNotFound {
        path: path.display().to_string(),
        source,
    })?;
    load_configuration_from_str(&content)
}

/// Load a configuration from INI text
pub fn load_configuration_from_str(text: &str) -> Result<Configuration> {
    let doc = IniDocument::parse(text)?;

    let url = doc.require(REQUEST_SECTION, "url")?;
    let username = doc.require(REQUEST_SECTION, "username")?;
    let password = doc.require(REQUEST_SECTION, "password")?;
    let verify = match doc.get(REQUEST_SECTION, "verify_certificates") {
        Some(raw) => parse_bool("verify_certificates", raw)?,
        None => false,
    };

    let keep = field_list(&doc, KEEP_SECTION)?;
    let discard = field_list(&doc, DISCARD_SECTION)?;
    let nesting = field_list(&doc, NESTING_SECTION)?;
    debug!(
        keep = keep.len(),
        discard = discard.len(),
        nesting = ?nesting,
        "Parsed field lists"
    );

    Configuration::builder()
        .url(url)
        .credentials(username, password)
        .keep_fields(keep)
        .discard_fields(discard)
        .nesting(nesting)
        .verify_certificates(verify)
        .build()
}

/// Parse a section's `fields` value as a JSON array of strings
fn field_list(doc: &IniDocument, section: &str) -> Result<Vec<String>> {
    let raw = doc.require(section, FIELDS_KEY)?;
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| Error::InvalidFieldList {
        section: section.to_string(),
        message: e.to_string(),
    })
}

/// Boolean spellings accepted by INI files
fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(Error::invalid_value(
            field,
            format!("expected a boolean, found '{raw}'"),
        )),
    }
}
