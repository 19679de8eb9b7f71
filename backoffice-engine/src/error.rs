//! Error types for the generic engines

use thiserror::Error;

use backoffice_fields::ConfigError;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors an engine reports to its caller.
///
/// Collaborator failures (load, save, delete, search) are not errors at
/// this boundary — they are caught inside the engine and converted to a
/// single user-facing notification. What remains here are programming
/// mistakes: bad configuration and operations against keys or phases that
/// do not exist.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration rejected at construction time
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No control exists for the given key
    #[error("unknown field: {key}")]
    UnknownField { key: String },

    /// No filter is configured under the given key
    #[error("unknown filter: {key}")]
    UnknownFilter { key: String },

    /// Operation invoked in a phase that does not allow it
    #[error("{operation} is not allowed while {phase}")]
    NotReady {
        operation: &'static str,
        phase: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::UnknownField { key: "surname".into() };
        assert_eq!(err.to_string(), "unknown field: surname");
    }

    #[test]
    fn config_error_passes_through() {
        let err = EngineError::from(ConfigError::NoFields {
            entity: "Customer".into(),
        });
        assert!(err.to_string().contains("Customer"));
    }
}
