//! Error types for port operations.

/// Contact/filter collaborator errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Reading or writing the backing store failed - includes operation name for tracing.
    #[error("I/O error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The collaborator cannot answer right now (offline, not loaded yet).
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Create an Io error with operation context.
    pub fn io(operation: &'static str, message: impl ToString) -> Self {
        Self::Io {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create an Unavailable error.
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_operation() {
        let err = SourceError::io("load_contacts", "permission denied");
        assert_eq!(
            err.to_string(),
            "I/O error in load_contacts: permission denied"
        );
    }

    #[test]
    fn serialization_error_message() {
        let err = SourceError::serialization("expected value at line 1");
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
