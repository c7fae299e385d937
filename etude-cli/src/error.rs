//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Corpus directory not found or not a directory
    DirectoryNotFound(String),
    /// Profile file not found or inaccessible
    FileNotFound(String),
    /// Configuration error
    ConfigError(String),
    /// Scoring error from core
    ScoringError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::DirectoryNotFound(path) => write!(f, "Directory not found: {path}"),
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ScoringError(msg) => write!(f, "Scoring error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
