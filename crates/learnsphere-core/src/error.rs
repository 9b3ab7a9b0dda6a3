//! Error types for LearnSphere.
//!
//! All fallible operations in the workspace return [`Error`] so that the
//! services can be composed without conversion glue.

use std::io;
use thiserror::Error as ThisError;

/// The core error type for all LearnSphere operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Requested record does not exist
    #[error("Not found: {key}")]
    NotFound { key: String },

    /// Login rejected
    #[error("Invalid credentials: {reason}")]
    InvalidCredentials { reason: String },

    /// Operation requires a signed-in user
    #[error("Not authenticated: {reason}")]
    Unauthenticated { reason: String },

    /// Validation error
    #[error("Validation error: {reason}")]
    ValidationError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Key/value storage failure
    #[error("Storage error: {reason}")]
    Storage { reason: String },

    /// Failure reported by a repository or remote backend
    #[error("Backend error: {reason}")]
    Backend { reason: String },

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a not found error
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials(reason: impl Into<String>) -> Self {
        Error::InvalidCredentials {
            reason: reason.into(),
        }
    }

    /// Create an unauthenticated error
    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Error::Unauthenticated {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation_error(reason: impl Into<String>) -> Self {
        Error::ValidationError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a storage error
    pub fn storage(reason: impl Into<String>) -> Self {
        Error::Storage {
            reason: reason.into(),
        }
    }

    /// Create a backend error
    pub fn backend(reason: impl Into<String>) -> Self {
        Error::Backend {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::not_found("document 42");
        assert!(err.to_string().contains("Not found"));
        assert!(err.to_string().contains("document 42"));

        let err = Error::invalid_credentials("wrong password");
        assert!(err.to_string().contains("Invalid credentials"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
