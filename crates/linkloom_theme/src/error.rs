//! Theme error types

use linkloom_core::CoreError;
use thiserror::Error;

/// Failures of a bundle fetch. Surfaced as the synchronizer's error state,
/// never fatal to the application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Network/transport error or non-success response
    #[error("could not load theme settings: {0}")]
    FetchFailure(String),

    /// Response body is not a decodable object
    #[error("theme settings are malformed: {0}")]
    MalformedPayload(String),

    /// The synchronizer already fetched during this mount
    #[error("theme settings were already requested for this session")]
    AlreadyStarted,
}

/// Why a reference could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// First path segment is not a core or semantic group
    UnknownGroup(String),
    /// No token exists at the path
    MissingPath,
    /// The path names a group rather than a value
    NotAValue,
    /// References loop back on themselves
    Cycle,
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedReason::UnknownGroup(group) => write!(f, "unknown token group '{}'", group),
            UnresolvedReason::MissingPath => f.write_str("no token at path"),
            UnresolvedReason::NotAValue => f.write_str("path names a token group"),
            UnresolvedReason::Cycle => f.write_str("reference cycle"),
        }
    }
}

/// Per-key projection failure. Logged, never shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("'{property}' references '{reference}': {reason}")]
    UnresolvedReference {
        property: String,
        reference: String,
        reason: UnresolvedReason,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level theme errors
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
