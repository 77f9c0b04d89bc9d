//! Engine error taxonomy.
//!
//! Almost every failure this engine can encounter is malformed or
//! inconsistent data, and those cases degrade (an `Option`, a catch-all
//! bucket) rather than error. The variants here cover the remainder:
//! unknown record ids, bad configuration, and failures of the external
//! document-parsing collaborator.

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Document source error: {0}")]
    DocumentSource(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Unknown error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl EngineError {
    /// Create a new validation error
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new not found error
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new document source error
    pub fn document_source<T: Into<String>>(msg: T) -> Self {
        Self::DocumentSource(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<T: Into<String>>(msg: T) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
