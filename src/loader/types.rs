//! Configuration types
//!
//! A [`Configuration`] is built once, either from a configuration file or
//! through [`ConfigurationBuilder`], and is read-only afterwards.

use crate::error::{Error, Result};
use crate::types::FieldSet;

/// Column allow-list / deny-list applied to the merged header set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    keep: FieldSet,
    discard: FieldSet,
}

impl FieldSelection {
    /// Create a selection, rejecting keep and discard both populated
    pub fn new(keep: FieldSet, discard: FieldSet) -> Result<Self> {
        if !keep.is_empty() && !discard.is_empty() {
            return Err(Error::ConflictingFieldLists);
        }
        Ok(Self { keep, discard })
    }

    /// Selection that passes every column through
    pub fn all() -> Self {
        Self::default()
    }

    /// Fields to keep (empty means "keep everything")
    pub fn keep(&self) -> &FieldSet {
        &self.keep
    }

    /// Fields to discard
    pub fn discard(&self) -> &FieldSet {
        &self.discard
    }

    /// Filter a merged header set, preserving its order
    pub fn apply(&self, headers: &FieldSet) -> FieldSet {
        if !self.keep.is_empty() {
            headers
                .iter()
                .filter(|h| self.keep.contains(*h))
                .cloned()
                .collect()
        } else if !self.discard.is_empty() {
            headers
                .iter()
                .filter(|h| !self.discard.contains(*h))
                .cloned()
                .collect()
        } else {
            headers.clone()
        }
    }
}

/// Resolved runtime configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    url: String,
    username: String,
    password: String,
    selection: FieldSelection,
    nesting_path: Vec<String>,
    verify_certificates: bool,
}

impl Configuration {
    /// Start building a configuration in code
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Endpoint to request
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Basic auth username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Basic auth password
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Keep/discard column selection
    pub fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    /// Keys walked from the response root down to the record list
    pub fn nesting_path(&self) -> &[String] {
        &self.nesting_path
    }

    /// Whether TLS certificates are validated (off unless configured)
    pub fn verify_certificates(&self) -> bool {
        self.verify_certificates
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("selection", &self.selection)
            .field("nesting_path", &self.nesting_path)
            .field("verify_certificates", &self.verify_certificates)
            .finish()
    }
}

/// Builder for [`Configuration`]
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    url: Option<String>,
    username: String,
    password: String,
    keep: FieldSet,
    discard: FieldSet,
    nesting_path: Vec<String>,
    verify_certificates: bool,
}

impl ConfigurationBuilder {
    /// Set the endpoint URL
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set basic auth credentials
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Add columns to keep; every other column is dropped
    #[must_use]
    pub fn keep_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Add columns to drop
    #[must_use]
    pub fn discard_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.discard.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Append keys to the nesting path
    #[must_use]
    pub fn nesting<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nesting_path.extend(path.into_iter().map(Into::into));
        self
    }

    /// Turn TLS certificate validation on or off
    #[must_use]
    pub fn verify_certificates(mut self, verify: bool) -> Self {
        self.verify_certificates = verify;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<Configuration> {
        let url = self.url.ok_or_else(|| Error::missing_key("REQUEST", "url"))?;
        url::Url::parse(&url)?;

        Ok(Configuration {
            url,
            username: self.username,
            password: self.password,
            selection: FieldSelection::new(self.keep, self.discard)?,
            nesting_path: self.nesting_path,
            verify_certificates: self.verify_certificates,
        })
    }
}
