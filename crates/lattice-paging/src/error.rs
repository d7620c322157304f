//! Error types for the paging mediator.

use std::path::PathBuf;

use crate::model::Selector;

/// Result type alias for mediator operations.
pub type Result<T> = std::result::Result<T, MediatorError>;

/// Errors raised by the mediator.
#[derive(Debug, thiserror::Error)]
pub enum MediatorError {
    /// Real content was requested but no content provider is registered,
    /// or the registered one has been dropped.
    #[error("No content provider registered to answer {selector:?} for section {section}")]
    ContentProviderMissing { selector: Selector, section: usize },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors loading or validating a [`MediatorConfig`](crate::MediatorConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing error.
    #[error("Failed to parse mediator config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Failed to serialize mediator config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File I/O error.
    #[error("Failed to read mediator config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field holds a value the mediator cannot use.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl MediatorError {
    /// Create a missing-provider error.
    pub fn provider_missing(selector: Selector, section: usize) -> Self {
        Self::ContentProviderMissing { selector, section }
    }
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
