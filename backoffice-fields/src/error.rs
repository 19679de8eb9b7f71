//! Error types for descriptor and configuration validation

use thiserror::Error;

/// Result type for configuration building
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building a form or list configuration.
///
/// These are developer mistakes, fatal at construction time — a running
/// screen never sees them.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A form configuration declared no fields
    #[error("form configuration for '{entity}' declares no fields")]
    NoFields { entity: String },

    /// A list configuration declared no columns
    #[error("list configuration for '{entity}' declares no columns")]
    NoColumns { entity: String },

    /// Two descriptors share a key
    #[error("duplicate descriptor key '{key}' in configuration for '{entity}'")]
    DuplicateKey { entity: String, key: String },

    /// A descriptor key does not name a property of the entity
    #[error("'{key}' is not a field of '{entity}'")]
    UnknownKey { entity: String, key: String },

    /// A select field references a related-data collection nobody loads
    #[error("field '{key}' references undeclared related data '{related}'")]
    UnknownRelatedSource { key: String, related: String },

    /// A pattern validator does not compile
    #[error("invalid pattern on field '{key}': {pattern}")]
    InvalidPattern { key: String, pattern: String },

    /// A filter names a search capability the service does not declare
    #[error("filter '{key}' dispatches to '{capability}', which the service does not provide")]
    UnknownCapability { key: String, capability: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnknownKey {
            entity: "Customer".into(),
            key: "surname".into(),
        };
        assert_eq!(err.to_string(), "'surname' is not a field of 'Customer'");
    }

    #[test]
    fn test_capability_error_display() {
        let err = ConfigError::UnknownCapability {
            key: "tax_id".into(),
            capability: "search-by-tax-id".into(),
        };
        assert!(err.to_string().contains("search-by-tax-id"));
    }
}
