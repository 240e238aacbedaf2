//! Configuration loader module
//!
//! Parse the sectioned configuration file into a [`Configuration`].
//!
//! # Overview
//!
//! The loader module provides:
//! - `Configuration` - Endpoint, credentials, column selection and nesting path
//! - `FieldSelection` - Keep/discard filtering of the merged header set
//! - INI parsing with validation

mod ini;
mod parser;
mod types;

pub use ini::{IniDocument, DEFAULT_SECTION};
pub use parser::{
    load_configuration, load_configuration_from_str, DISCARD_SECTION, KEEP_SECTION,
    NESTING_SECTION, REQUEST_SECTION,
};
pub use types::{Configuration, ConfigurationBuilder, FieldSelection};
