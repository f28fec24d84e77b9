//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid decimal number.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Input file with an unrecognized extension.
    #[error("Unsupported file type: {0}. Use .json, .yaml or .yml.")]
    UnsupportedFile(String),

    /// Session line that is not a known command.
    #[error("Unknown command: {0}. Type 'help' for a list of commands.")]
    UnknownCommand(String),

    /// Known command with the wrong arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
