//! Unified error type for the domain layer
//!
//! Schema invariant violations and illegal navigation transitions surface as
//! `DomainError`. Field validation failures are *not* errors in this sense:
//! they are data, carried by `ErrorMap` (see `validation`).

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A schema or value failed an invariant check
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Two definitions share an identifier that must be unique
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Referenced item does not exist
    #[error("Not found: {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },

    /// Parse error (for wire tags and value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for schema invariant violations.
    ///
    /// # Example
    /// ```ignore
    /// if sections.is_empty() {
    ///     return Err(DomainError::validation("A form needs at least one section"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a duplicate identifier error
    pub fn duplicate_id(kind: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind,
            id: id.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("form has no sections");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: form has no sections");
    }

    #[test]
    fn test_duplicate_id_error() {
        let err = DomainError::duplicate_id("field", "email");
        assert_eq!(err.to_string(), "Duplicate field id: email");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("field", "phone");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("phone"));
    }

    #[test]
    fn test_invalid_state_transition_error() {
        let err = DomainError::invalid_state_transition("already on the first section");
        assert_eq!(
            err.to_string(),
            "Invalid state transition: already on the first section"
        );
    }
}
