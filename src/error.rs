//! Custom error types for tally-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for tally-cli operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for input data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Primary entity not found (lookups by handle at the CLI boundary)
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A referenced account does not exist. `role` distinguishes which
    /// reference failed (plain account, transfer source, transfer target);
    /// the identifier the caller supplied is echoed back.
    #[error("Unknown {role}: {identifier}")]
    InvalidReference {
        role: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TallyError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create an invalid-reference error for an account looked up by id or name
    pub fn unknown_account(identifier: impl Into<String>) -> Self {
        Self::InvalidReference {
            role: "account",
            identifier: identifier.into(),
        }
    }

    /// Create an invalid-reference error for a transfer's source account
    pub fn unknown_source_account(identifier: impl Into<String>) -> Self {
        Self::InvalidReference {
            role: "source account",
            identifier: identifier.into(),
        }
    }

    /// Create an invalid-reference error for a transfer's target account
    pub fn unknown_target_account(identifier: impl Into<String>) -> Self {
        Self::InvalidReference {
            role: "target account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an invalid-reference error
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::InvalidReference { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for tally-cli operations
pub type TallyResult<T> = Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TallyError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = TallyError::account_not_found("Checking");
        assert_eq!(err.to_string(), "Account not found: Checking");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_reference());
    }

    #[test]
    fn test_invalid_reference_errors() {
        let err = TallyError::unknown_account("ghost");
        assert_eq!(err.to_string(), "Unknown account: ghost");
        assert!(err.is_invalid_reference());

        let err = TallyError::unknown_source_account("acc-123");
        assert_eq!(err.to_string(), "Unknown source account: acc-123");

        let err = TallyError::unknown_target_account("acc-456");
        assert_eq!(err.to_string(), "Unknown target account: acc-456");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tally_err: TallyError = io_err.into();
        assert!(matches!(tally_err, TallyError::Io(_)));
    }
}
