//! Core error types

use thiserror::Error;

/// Errors raised by host primitives
#[derive(Error, Debug)]
pub enum CoreError {
    /// A namespace overlaps one that is already claimed on the same root
    #[error("namespace '{requested}' overlaps claimed namespace '{claimed}'")]
    NamespaceConflict { requested: String, claimed: String },

    /// A root attribute is already owned by another projector
    #[error("root attribute '{0}' is already claimed")]
    AttributeConflict(String),

    /// Namespace prefix is not a custom-property prefix
    #[error("invalid namespace prefix '{0}': expected '--name-'")]
    InvalidNamespace(String),

    /// Local storage backend failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem access failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Persisted state could not be decoded
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
