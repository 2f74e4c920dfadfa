//! Custom error types for RentalCLI
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for RentalCLI operations
#[derive(Error, Debug)]
pub enum RentalError {
    /// Configuration errors, including a malformed menu tree
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user-entered field values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Terminal (raw mode, alternate screen, event polling) errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The user aborted the session from a picker (Ctrl-C)
    #[error("Session interrupted")]
    Interrupted,
}

impl RentalError {
    /// Create a "not found" error for units
    pub fn unit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Unit",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for tenants
    pub fn tenant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Tenant",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for any entity type
    pub fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
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

    /// Check if this is a storage-layer failure
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_) | Self::Json(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for RentalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RentalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for RentalError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for RentalCLI operations
pub type RentalResult<T> = Result<T, RentalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RentalError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = RentalError::tenant_not_found("Jane Doe");
        assert_eq!(err.to_string(), "Tenant not found: Jane Doe");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_error() {
        let err = RentalError::Validation("Value must be positive number".into());
        assert!(err.is_validation());
        assert!(!err.is_storage());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let rental_err: RentalError = io_err.into();
        assert!(matches!(rental_err, RentalError::Io(_)));
        assert!(rental_err.is_storage());
    }
}
