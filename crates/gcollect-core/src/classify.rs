//! Root validation.
//!
//! Refuses `/` and top-level directories like `/var` before anything touches
//! the filesystem, then classifies the root as a file or a directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::candidate::PathKind;
use crate::error::RootRejection;

/// A root that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRoot {
    /// Canonical form of the root.
    pub path: PathBuf,
    /// Whether the root is a file or a directory.
    pub kind: PathKind,
}

/// An absolute path with fewer than two separators (`/`, `/var`) is too shallow.
pub fn is_too_shallow(path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.starts_with('/') && text.matches('/').count() < 2
}

/// Validate and classify a root path.
///
/// The shallow-path rule is checked against the path as given (before any
/// filesystem access) and again against its canonical form.
pub fn validate_root(path: &Path) -> Result<ValidatedRoot, RootRejection> {
    if is_too_shallow(path) {
        return Err(RootRejection::TooShallow {
            path: path.to_path_buf(),
        });
    }

    let canonical = fs::canonicalize(path).map_err(|source| RootRejection::InvalidRoot {
        path: path.to_path_buf(),
        source,
    })?;

    if is_too_shallow(&canonical) {
        return Err(RootRejection::TooShallow { path: canonical });
    }

    let metadata = fs::metadata(&canonical).map_err(|source| RootRejection::InvalidRoot {
        path: path.to_path_buf(),
        source,
    })?;

    let kind = PathKind::from_metadata(&metadata).ok_or_else(|| RootRejection::UnsupportedKind {
        path: path.to_path_buf(),
    })?;

    debug!(root = %canonical.display(), ?kind, "root validated");

    Ok(ValidatedRoot {
        path: canonical,
        kind,
    })
}
