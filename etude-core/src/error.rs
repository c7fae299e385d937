//! Error types for corpus scoring

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for extraction, alignment and scoring operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed XML, or a document that does not fit its schema profile
    #[error("Failed to parse '{}': {message}", path.display())]
    SchemaParse { path: PathBuf, message: String },

    /// A gold document has no counterpart in the test corpus
    #[error(
        "No test document '{}' for gold document '{}'",
        test.display(),
        gold.display()
    )]
    Correspondence { gold: PathBuf, test: PathBuf },

    /// Invalid metric, profile or selector configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Requested schema profile is not built in
    #[error("Unknown schema profile: {0}")]
    UnknownProfile(String),

    /// I/O failure while reading a document or profile
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create an I/O error bound to the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, Error>;
