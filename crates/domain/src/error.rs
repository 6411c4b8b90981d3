//! Unified error types for the domain layer
//!
//! Data insufficiency (empty filter, undersized pool) is modelled as session
//! state, never as an error. `DomainError` only covers validation of
//! incoming values and programming faults such as asking for a round from an
//! undersized pool.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Round generation was requested from a pool that cannot fill a round
    #[error("Insufficient pool: need at least {required} eligible contacts, have {actual}")]
    InsufficientPool { required: usize, actual: usize },
}

impl DomainError {
    /// Creates a validation error for rejected field values.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Display name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an insufficient pool error
    pub fn insufficient_pool(required: usize, actual: usize) -> Self {
        Self::InsufficientPool { required, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown contact category: pets");
        assert_eq!(err.to_string(), "Parse error: Unknown contact category: pets");
    }

    #[test]
    fn test_insufficient_pool_error() {
        let err = DomainError::insufficient_pool(5, 3);
        assert!(matches!(
            err,
            DomainError::InsufficientPool {
                required: 5,
                actual: 3
            }
        ));
        assert_eq!(
            err.to_string(),
            "Insufficient pool: need at least 5 eligible contacts, have 3"
        );
    }
}
