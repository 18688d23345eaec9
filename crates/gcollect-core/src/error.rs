//! Error types for a collection run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::age::DEFAULT_EXPIRE_DAYS;

/// Errors in the run configuration, detected before any traversal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No root path was given.
    #[error("-dir argument is required.")]
    MissingRoot,

    /// The expiry value is not a non-negative integer.
    #[error(
        "Invalid integer value in argument -expire={value}. Please use integer value to specify \
         the number of days, or skip it to use default {} days.",
        DEFAULT_EXPIRE_DAYS
    )]
    InvalidExpireValue { value: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Reasons a root path is refused.
#[derive(Debug, Error)]
pub enum RootRejection {
    /// The root is `/` or a directory directly under it.
    #[error(
        "No, it doesn't work with root or any top-level directory. It will not process \"{}\" \
         or any other \"/directory/\" under root.",
        path.display()
    )]
    TooShallow { path: PathBuf },

    /// The root does not exist or cannot be accessed.
    #[error("Invalid root {}: {source}", path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root exists but is neither a regular file nor a directory.
    #[error("Root is neither a regular file nor a directory: {}", path.display())]
    UnsupportedKind { path: PathBuf },
}

/// Fatal errors that end a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Root(#[from] RootRejection),

    /// A directory or entry could not be read mid-walk.
    #[error("Failed to walk {}: {source}", path.display())]
    WalkFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The operator's answer could not be read.
    #[error("Failed to read confirmation: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Create a walk failure with path context.
    pub fn walk(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WalkFailure {
            path: path.into(),
            source,
        }
    }
}

/// A non-fatal error on a single file. The walk continues past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
