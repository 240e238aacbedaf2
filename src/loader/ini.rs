//! Sectioned key/value (INI) reader
//!
//! Follows the raw config-parser dialect the configuration files are written
//! for: `[SECTION]` headers, `key = value` or `key: value` options, full-line
//! `#`/`;` comments, indented continuation lines and a `DEFAULT` section that
//! every other section falls back to. Option names are case-insensitive.

use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Name of the section whose options are visible from every other section
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A parsed INI document
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    defaults: IndexMap<String, String>,
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl IniDocument {
    /// Parse INI text
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Self::default();
        let mut current: Option<String> = None;
        // Option that an indented line would continue
        let mut last_key: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(' ') || raw.starts_with('\t');
            if indented {
                if let (Some(section), Some(key)) = (current.as_deref(), last_key.as_deref()) {
                    let value = doc
                        .section_mut(section)
                        .get_mut(key)
                        .ok_or_else(|| Error::syntax(line_no, "orphan continuation line"))?;
                    if !value.is_empty() {
                        value.push('\n');
                    }
                    value.push_str(trimmed);
                    continue;
                }
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .ok_or_else(|| {
                        Error::syntax(line_no, format!("malformed section header: {trimmed}"))
                    })?
                    .trim();
                if name.is_empty() {
                    return Err(Error::syntax(line_no, "empty section name"));
                }
                if name != DEFAULT_SECTION && doc.sections.contains_key(name) {
                    return Err(Error::syntax(line_no, format!("duplicate section [{name}]")));
                }
                if name != DEFAULT_SECTION {
                    doc.sections.insert(name.to_string(), IndexMap::new());
                }
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(section) = current.as_deref() else {
                return Err(Error::syntax(
                    line_no,
                    format!("option outside of any section: {trimmed}"),
                ));
            };

            let (key, value) = split_option(trimmed).ok_or_else(|| {
                Error::syntax(line_no, format!("expected 'key = value', found: {trimmed}"))
            })?;
            let key = key.to_lowercase();
            if key.is_empty() {
                return Err(Error::syntax(line_no, "empty option name"));
            }

            let options = doc.section_mut(section);
            if options.contains_key(&key) {
                return Err(Error::syntax(
                    line_no,
                    format!("duplicate option '{key}' in section [{section}]"),
                ));
            }
            options.insert(key.clone(), value.to_string());
            last_key = Some(key);
        }

        Ok(doc)
    }

    /// Whether a section exists (the `DEFAULT` section never counts)
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Section names in file order
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Look up an option, falling back to the `DEFAULT` section
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.sections
            .get(section)?
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(String::as_str)
    }

    /// Look up an option that must exist
    pub fn require(&self, section: &str, key: &str) -> Result<&str> {
        if !self.has_section(section) {
            return Err(Error::missing_section(section));
        }
        self.get(section, key)
            .ok_or_else(|| Error::missing_key(section, key))
    }

    fn section_mut(&mut self, section: &str) -> &mut IndexMap<String, String> {
        if section == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections.entry(section.to_string()).or_default()
        }
    }
}

/// Split `key = value` / `key: value` on the first delimiter
fn split_option(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(['=', ':'])?;
    Some((line[..pos].trim(), line[pos + 1..].trim()))
}
