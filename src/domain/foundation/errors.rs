//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' violates a profile invariant: {reason}")]
    Invariant { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invariant violation error.
    pub fn invariant(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::Invariant {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field path.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Invariant { field, .. } => field,
        }
    }
}

/// Error codes surfaced to the service layer wrapping the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // State errors
    ConcurrencyConflict,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::Invariant { .. } => ErrorCode::ValidationFailed,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_messages_name_the_field() {
        assert_eq!(
            ValidationError::empty_field("background.industry").to_string(),
            "Field 'background.industry' cannot be empty"
        );
        assert_eq!(
            ValidationError::out_of_range("score", 0, 100, 150).to_string(),
            "Field 'score' must be between 0 and 100, got 150"
        );
        assert_eq!(
            ValidationError::invariant("state_transition", "stage cannot move back").to_string(),
            "Field 'state_transition' violates a profile invariant: stage cannot move back"
        );
    }

    #[test]
    fn validation_error_field_accessor() {
        let err = ValidationError::invalid_format("stage", "unknown variant");
        assert_eq!(err.field(), "stage");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ConcurrencyConflict, "Profile changed");
        assert_eq!(format!("{}", err), "[CONCURRENCY_CONFLICT] Profile changed");
    }

    #[test]
    fn domain_error_from_validation_keeps_field_detail() {
        let err: DomainError = ValidationError::out_of_range("personality.openness", 0, 100, 120).into();

        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(
            err.details.get("field"),
            Some(&"personality.openness".to_string())
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(ErrorCode::DatabaseError.to_string(), "DATABASE_ERROR");
        assert_eq!(ErrorCode::InternalError.to_string(), "INTERNAL_ERROR");
    }
}
