//! Error types for primitive parsing.

use thiserror::Error;

/// Errors raised while constructing primitive values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Byte input of the wrong width.
    #[error("Invalid length for {kind}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// The kind of value being built.
        kind: &'static str,
        /// Required width.
        expected: usize,
        /// Supplied width.
        actual: usize,
    },

    /// Malformed textual input.
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Error message.
        message: String,
    },

    /// Type name outside the supported vocabulary.
    #[error("Unsupported type: {name}")]
    UnsupportedType {
        /// The rejected type name.
        name: String,
    },
}

impl PrimitiveError {
    /// Create an invalid format error.
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an unsupported type error.
    pub fn unsupported_type<S: Into<String>>(name: S) -> Self {
        Self::UnsupportedType { name: name.into() }
    }
}

/// Result type for primitive operations.
pub type PrimitiveResult<T> = std::result::Result<T, PrimitiveError>;
