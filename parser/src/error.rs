//! Error types for argument definition evaluation.

use thiserror::Error;

/// Errors raised while evaluating a definition's defaulting logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A textual default could not be converted by the declared parser.
    #[error("invalid default `{text}` for `{key}`: {reason}")]
    InvalidDefault {
        /// Full path string of the property.
        key: String,
        /// Default text as declared.
        text: String,
        /// Message returned by the value parser.
        reason: String,
    },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
