//! Error types for the clusters model
//!
//! Build errors come from builders, parse errors from the codec reader, and
//! the remaining variants wrap the JSON, YAML and IO layers underneath.

use thiserror::Error;

/// Unified error type for the model and codec layers
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Build Errors
    // =========================================================================
    #[error("Invalid JSON in attribute '{attribute}': {source}")]
    InvalidAttributeJson {
        attribute: String,
        #[source]
        source: serde_json::Error,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Failed to read '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Expected a JSON {expected} document, found {found}")]
    UnexpectedDocument {
        expected: &'static str,
        found: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Output and Configuration Errors
    // =========================================================================
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error was raised while building a value
    pub fn is_build_error(&self) -> bool {
        matches!(self, Error::InvalidAttributeJson { .. })
    }

    /// Check if this error was raised while reading a document
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. } | Error::UnexpectedDocument { .. } | Error::Json(_)
        )
    }
}

/// Result type alias for the model and codec layers
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = Error::Parse {
            path: "creation_timestamp".into(),
            message: "premature end of input".into(),
        };
        assert!(err.is_parse_error());
        assert!(!err.is_build_error());

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::InvalidAttributeJson {
            attribute: "payload".into(),
            source,
        };
        assert!(err.is_build_error());
        assert!(!err.is_parse_error());

        let err = Error::Configuration("unknown kind".into());
        assert!(!err.is_build_error());
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::Parse {
            path: "region.enabled".into(),
            message: "expected a boolean, found string".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read 'region.enabled': expected a boolean, found string"
        );

        let err = Error::UnexpectedDocument {
            expected: "object",
            found: "array",
        };
        assert_eq!(err.to_string(), "Expected a JSON object document, found array");
    }
}
