//! Error types for request-to-csv
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! Errors are never turned into a process exit inside the library; the
//! binary maps them to exit codes with [`Error::exit_code`].

use thiserror::Error;

/// The main error type for request-to-csv
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Could not read configuration file '{path}': {source}")]
    ConfigNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration syntax error at line {line}: {message}")]
    ConfigSyntax { line: usize, message: String },

    #[error("Missing configuration {}", describe_missing(.section, .key.as_deref()))]
    MissingConfig { section: String, key: Option<String> },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Field list in section [{section}] is not a JSON array of strings: {message}")]
    InvalidFieldList { section: String, message: String },

    #[error("KEEP_FIELDS and DISCARD_FIELDS cannot both be populated")]
    ConflictingFieldLists,

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Response is neither well-formed XML nor valid JSON")]
    UnrecognizedFormat,

    #[error("XML parsing error: {message}")]
    XmlParse { message: String },

    #[error("Key \"{key}\" not found in response")]
    MissingNode { key: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_missing(section: &str, key: Option<&str>) -> String {
    match key {
        Some(key) => format!("key '{key}' in section [{section}]"),
        None => format!("section [{section}]"),
    }
}

impl Error {
    /// Create a configuration syntax error
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::ConfigSyntax {
            line,
            message: message.into(),
        }
    }

    /// Create a missing section error
    pub fn missing_section(section: impl Into<String>) -> Self {
        Self::MissingConfig {
            section: section.into(),
            key: None,
        }
    }

    /// Create a missing key error
    pub fn missing_key(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingConfig {
            section: section.into(),
            key: Some(key.into()),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an XML parse error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::XmlParse {
            message: message.into(),
        }
    }

    /// Create a missing nesting node error
    pub fn missing_node(key: impl Into<String>) -> Self {
        Self::MissingNode { key: key.into() }
    }

    /// Create an invalid record error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// | code | class |
    /// |------|-------|
    /// | 1 | HTTP 5xx, connection or transport failure |
    /// | 2 | unrecognized response format |
    /// | 3 | missing nesting key |
    /// | 4 | configuration file not found |
    /// | 5 | malformed or incomplete configuration |
    /// | 6 | malformed field list |
    /// | 7 | keep and discard fields both populated |
    /// | 8 | output write failure |
    /// | 9 | records are not a list of objects |
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Http(_) | Error::Connection(_) | Error::HttpStatus { .. } => 1,
            Error::UnrecognizedFormat | Error::XmlParse { .. } => 2,
            Error::MissingNode { .. } => 3,
            Error::ConfigNotFound { .. } => 4,
            Error::ConfigSyntax { .. }
            | Error::MissingConfig { .. }
            | Error::InvalidConfigValue { .. }
            | Error::InvalidUrl(_) => 5,
            Error::InvalidFieldList { .. } => 6,
            Error::ConflictingFieldLists => 7,
            Error::Csv(_) | Error::Io(_) => 8,
            Error::InvalidRecord { .. } => 9,
        }
    }
}

/// Exit code for command-line usage errors, reported by clap before any
/// [`Error`] can exist
pub const USAGE_EXIT_CODE: u8 = 10;

/// Result type alias for request-to-csv
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::missing_section("REQUEST");
        assert_eq!(err.to_string(), "Missing configuration section [REQUEST]");

        let err = Error::missing_key("REQUEST", "url");
        assert_eq!(
            err.to_string(),
            "Missing configuration key 'url' in section [REQUEST]"
        );

        let err = Error::missing_node("employees");
        assert_eq!(err.to_string(), "Key \"employees\" not found in response");

        let err = Error::http_status(500, "boom");
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        let io = || std::io::Error::new(std::io::ErrorKind::NotFound, "gone");

        assert_eq!(Error::http_status(503, "").exit_code(), 1);
        assert_eq!(Error::UnrecognizedFormat.exit_code(), 2);
        assert_eq!(Error::missing_node("a").exit_code(), 3);
        assert_eq!(
            Error::ConfigNotFound {
                path: "x.ini".into(),
                source: io(),
            }
            .exit_code(),
            4
        );
        assert_eq!(Error::missing_section("NESTING").exit_code(), 5);
        assert_eq!(Error::syntax(3, "no delimiter").exit_code(), 5);
        assert_eq!(
            Error::InvalidFieldList {
                section: "KEEP_FIELDS".into(),
                message: "expected array".into(),
            }
            .exit_code(),
            6
        );
        assert_eq!(Error::ConflictingFieldLists.exit_code(), 7);
        assert_eq!(Error::Io(io()).exit_code(), 8);
        assert_eq!(Error::invalid_record("not an object").exit_code(), 9);
        assert_ne!(USAGE_EXIT_CODE, 0);
    }
}
