//! Error types for lastrun operations.
//!
//! This module defines [`LastRunError`], the error type used by configuration
//! loading, project filtering and the CLI, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - The tracker's run hooks never surface errors; they log and degrade
//! - Use `LastRunError` for configuration problems the user must fix
//! - Use `anyhow::Error` (via `LastRunError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lastrun operations.
#[derive(Debug, Error)]
pub enum LastRunError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A project selector named a project that is not configured.
    #[error("Project(s) \"{name}\" not found. Available projects: \"{available}\"")]
    ProjectNotFound { name: String, available: String },

    /// IO error on a specific path.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LastRunError {
    /// Wrap an IO error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for lastrun operations.
pub type Result<T> = std::result::Result<T, LastRunError>;
