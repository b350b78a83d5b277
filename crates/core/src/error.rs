//! Error types for bkt-core
//!
//! Every failure a session action can hit maps onto one of these variants,
//! and every variant is recoverable from the session's point of view.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for bkt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bkt-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A local file could not be read for upload
    #[error("Failed to read {}: {source}", path.display())]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A user-supplied pattern is not a valid regular expression
    #[error("Malformed pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or service error
    #[error("Network error: {0}")]
    Network(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Reading user input failed
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Failure reported by the object store (list, put, delete)
    Store,
    /// Local filesystem or terminal failure
    LocalIo,
    /// Pattern failed to compile
    Pattern,
    /// Configuration or startup problem
    Setup,
}

impl Error {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Auth(_)
            | Error::NotFound(_)
            | Error::Network(_)
            | Error::Conflict(_) => ErrorKind::Store,
            Error::Io(_) | Error::LocalRead { .. } | Error::Prompt(_) => ErrorKind::LocalIo,
            Error::Pattern { .. } => ErrorKind::Pattern,
            Error::Config(_) | Error::TomlParse(_) | Error::InvalidUrl(_) => ErrorKind::Setup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::Network("test".into()).kind(), ErrorKind::Store);
        assert_eq!(Error::Auth("test".into()).kind(), ErrorKind::Store);
        assert_eq!(Error::NotFound("test".into()).kind(), ErrorKind::Store);
        assert_eq!(Error::Conflict("test".into()).kind(), ErrorKind::Store);
        assert_eq!(Error::Prompt("eof".into()).kind(), ErrorKind::LocalIo);
        assert_eq!(Error::Config("test".into()).kind(), ErrorKind::Setup);

        let err = Error::LocalRead {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.kind(), ErrorKind::LocalIo);

        let err = Error::Pattern {
            pattern: "(".into(),
            message: "unclosed group".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Pattern);
    }

    #[test]
    fn test_error_display() {
        let err = Error::Pattern {
            pattern: "[a".into(),
            message: "unclosed character class".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed pattern '[a': unclosed character class"
        );

        let err = Error::LocalRead {
            path: PathBuf::from("/tmp/nope.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert_eq!(err.to_string(), "Failed to read /tmp/nope.txt: No such file");
    }
}
