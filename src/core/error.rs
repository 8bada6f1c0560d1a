//! Engine error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or evaluating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A settings file contained invalid JSON. Loading stops immediately;
    /// no partial configuration is produced.
    #[error("Malformed JSON in {path}: {source}")]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A permission rule pattern could not be parsed
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Attempted to write to a scope that is not file-backed
    #[error("Scope '{0}' is read-only")]
    ScopeReadOnly(String),

    /// A named skill, subagent, or server does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A destructive operation was attempted without confirmation
    #[error("Refusing to {0} without explicit confirmation")]
    ConfirmationRequired(String),

    /// A target already exists and overwriting was not requested
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// A blocking hook rejected the operation
    #[error("Blocked by hook: {reason}")]
    HookBlocked { reason: String },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl ConfigError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        ConfigError::Other(msg.into())
    }

    /// Create an invalid-pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
