//! Error types for the forms registry

use std::path::PathBuf;
use thiserror::Error;

/// Result type for forms operations
pub type Result<T> = std::result::Result<T, FormsError>;

/// Errors that can occur while building or rendering form fields
#[derive(Debug, Error)]
pub enum FormsError {
    /// No builder category registered for the requested kind
    #[error("unknown field kind: {kind}")]
    UnknownKind { kind: String },

    /// Field not found by name
    #[error("field does not exist: {name}")]
    FieldNotFound { name: String },

    /// The markup helper has no function for this kind and shape
    #[error("no markup helper for field kind '{kind}'")]
    UnsupportedHelper { kind: String },

    /// Configuration file extension is not toml, yaml or json
    #[error("unsupported configuration format: {path}")]
    UnsupportedConfigFormat { path: PathBuf },

    /// Configuration extraction failed
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl From<figment::Error> for FormsError {
    fn from(error: figment::Error) -> Self {
        FormsError::Config(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormsError::UnknownKind {
            kind: "colour".into(),
        };
        assert_eq!(err.to_string(), "unknown field kind: colour");
    }

    #[test]
    fn test_field_not_found_mentions_name() {
        let err = FormsError::FieldNotFound {
            name: "email".into(),
        };
        assert!(err.to_string().contains("email"));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_figment_error_is_boxed() {
        let err: FormsError = figment::Error::from("bad value".to_string()).into();
        assert!(matches!(err, FormsError::Config(_)));
        assert!(err.to_string().contains("bad value"));
    }
}
