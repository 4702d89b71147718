//! Error types for fedconf operations.
//!
//! This module defines [`FedconfError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `FedconfError` for configuration errors the caller can act on
//! - Use `anyhow::Error` (via `FedconfError::Other`) for unexpected errors
//! - Manifest problems are never errors; they degrade to an empty shared map
//! - A missing project variable is fatal since no server port can be derived

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fedconf operations.
#[derive(Debug, Error)]
pub enum FedconfError {
    /// Caller configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse caller configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Mode name that cannot select env files.
    #[error("Invalid mode '{mode}': \"local\" and empty names conflict with .env file naming")]
    InvalidMode { mode: String },

    /// Project directory has no final path segment to derive an identifier from.
    #[error("Cannot derive a project identifier from {path}")]
    InvalidProjectDir { path: PathBuf },

    /// The project's own URL variable is absent from the resolved environment.
    #[error("no environment variable found for project identifier `{identifier}` (expected `{key}`)")]
    MissingProjectVariable { identifier: String, key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for fedconf operations.
pub type Result<T> = std::result::Result<T, FedconfError>;
