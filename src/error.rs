//! Error types for the partita editing session.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ValidationError`] - Entity construction/mutation errors
//! - [`RegistryError`] - Identity registry errors
//! - [`ConfigError`] - Piece config load/save errors
//! - [`SessionError`] - Top-level session errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised when an entity is built or mutated with bad data.
///
/// Dialogs catch these and re-prompt for exactly the named field, so the
/// `field` value must match the prompt vocabulary ("style", "license",
/// "clef", ...).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A field was given a value outside its fixed enumeration.
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// A required field was left blank.
    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl ValidationError {
    /// Convenience constructor for [`ValidationError::InvalidValue`].
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// The offending field, where the error names one.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidValue { field, .. } => field,
            Self::MissingField(field) => field,
        }
    }
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors from the identity registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Entry not found.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// IO error.
    #[error("Registry IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error.
    #[error("Registry JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The bundled seed snapshot could not be decoded.
    #[error("Invalid bundled registry snapshot: {0}")]
    InvalidSnapshot(String),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while writing the piece config file.
///
/// Reads never produce these: a missing or malformed config means "start
/// fresh", not a failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to write file.
    #[error("Failed to write config: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization failed.
    #[error("Config JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Session Errors (top-level)
// =============================================================================

/// Top-level errors for the interactive session.
///
/// This is the main error type returned by [`crate::session::Session::run`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// Validation error that no dialog recovered.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Registry error.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Config error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The prompt source failed (stdin closed, terminal gone).
    #[error("Prompt IO error: {0}")]
    Prompt(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ValidationError -> SessionError
        let validation_err = ValidationError::invalid("style", "no such style");
        let session_err: SessionError = validation_err.into();
        assert!(session_err.to_string().contains("style"));

        // RegistryError -> SessionError
        let registry_err = RegistryError::NotFound("violin".into());
        let session_err: SessionError = registry_err.into();
        assert!(session_err.to_string().contains("violin"));
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::invalid("license", "must be a known license");
        assert_eq!(err.field(), "license");
        let msg = err.to_string();
        assert!(msg.contains("license"));
        assert!(msg.contains("must be a known license"));
    }
}
