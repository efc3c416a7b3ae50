//! Error types for the command-line interface.

use thiserror::Error;

/// Errors reported by `command-info` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A `--path` segment names no declared subcommand.
    #[error("unknown subcommand `{name}` under `{parent}`")]
    UnknownSubcommand {
        /// Missing segment.
        name: String,
        /// Space-joined path that was resolved so far.
        parent: String,
    },

    /// Structural validation reported problems.
    #[error("{0} validation error(s) found")]
    ValidationFailed(usize),
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
