//! Error types for keyrange.

use thiserror::Error;

/// Main error type for range parsing and keyframe queries.
#[derive(Error, Debug)]
pub enum Error {
    /// Range specification could not be resolved to canonical bounds
    #[error("Invalid range spec {input}: {reason}")]
    InvalidRangeSpec { input: String, reason: String },

    /// Sample sequence is not strictly ascending or holds an invalid position
    #[error("Invalid sample sequence at index {index}: {reason}")]
    InvalidSampleSequence { index: usize, reason: String },

    /// Attribute has no keyframes in the store
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    /// Query mode or output flag name not recognised
    #[error("Unknown query flag: {0}")]
    UnknownQueryFlag(String),

    /// Keyframe time or value is not usable
    #[error("Invalid keyframe: {0}")]
    InvalidKeyframe(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid range spec error for the given raw input.
    pub fn invalid_spec(input: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidRangeSpec {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an invalid sample sequence error.
    pub fn invalid_sequence(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidSampleSequence {
            index,
            reason: reason.into(),
        }
    }

    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result type alias for keyrange operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::invalid_spec("\"1:2:3\"", "more than one ':'");
        let msg = e.to_string();
        assert!(msg.contains("1:2:3"));
        assert!(msg.contains("more than one"));

        let e = Error::invalid_sequence(4, "not ascending");
        assert!(e.to_string().contains("index 4"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
