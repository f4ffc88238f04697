//! Custom error types for BuzzPay
//!
//! This module defines the error hierarchy for the application using thiserror.
//! Every variant is recoverable at the boundary where it occurs: validation
//! problems go back to the user, store failures become a visible message and
//! a failed share falls back to the clipboard.

use thiserror::Error;

/// The main error type for BuzzPay operations
#[derive(Error, Debug)]
pub enum BuzzPayError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A form step or record failed validation (user-correctable)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A caller passed an argument outside the accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Create/read/update failure from the record store
    #[error("Store error: {0}")]
    Store(String),

    /// No share target could be opened and the clipboard fallback failed too
    #[error("Share target unavailable: {0}")]
    ShareTargetUnavailable(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl BuzzPayError {
    /// Create a "not found" error for payment requests
    pub fn request_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Payment request",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the record store
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl From<std::io::Error> for BuzzPayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BuzzPayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for BuzzPayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result type alias for BuzzPay operations
pub type BuzzPayResult<T> = Result<T, BuzzPayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuzzPayError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BuzzPayError::request_not_found("abc-123");
        assert_eq!(err.to_string(), "Payment request not found: abc-123");
        assert!(err.is_not_found());
        assert!(!err.is_store());
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = BuzzPayError::InvalidArgument("step index 9 out of range (0..=5)".into());
        assert_eq!(
            err.to_string(),
            "Invalid argument: step index 9 out of range (0..=5)"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuzzPayError = io_err.into();
        assert!(matches!(err, BuzzPayError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BuzzPayError = json_err.into();
        assert!(matches!(err, BuzzPayError::Json(_)));
    }
}
