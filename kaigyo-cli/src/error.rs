//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or unreadable
    FileNotFound(String),
    /// A test file line that does not follow the expected format
    MalformedTestLine { line: usize, reason: String },
    /// One or more conformance mismatches
    ConformanceFailed { mismatches: usize, lines: usize },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {}", path),
            CliError::MalformedTestLine { line, reason } => {
                write!(f, "Malformed test line {}: {}", line, reason)
            }
            CliError::ConformanceFailed { mismatches, lines } => {
                write!(f, "{} mismatches across {} test lines", mismatches, lines)
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
