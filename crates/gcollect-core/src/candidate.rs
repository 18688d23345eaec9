//! Per-entry types produced during a walk.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Kind of a filesystem entry, as far as collection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl PathKind {
    /// Classify metadata. Symlinks, sockets, devices and the like yield `None`.
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        let file_type = metadata.file_type();
        if file_type.is_dir() {
            Some(Self::Directory)
        } else if file_type.is_file() {
            Some(Self::File)
        } else {
            None
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }
}

/// A visited entry under consideration for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCandidate {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Last modification time.
    pub modified_at: SystemTime,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Size in bytes.
    pub size: u64,
}

impl FileCandidate {
    /// Create a candidate for a regular file.
    pub fn file(path: impl Into<PathBuf>, modified_at: SystemTime, size: u64) -> Self {
        Self {
            path: path.into(),
            modified_at,
            is_directory: false,
            size,
        }
    }

    /// Build a candidate from metadata.
    ///
    /// Fails if the platform cannot report a modification time.
    pub fn from_metadata(path: impl Into<PathBuf>, metadata: &Metadata) -> std::io::Result<Self> {
        Ok(Self {
            path: path.into(),
            modified_at: metadata.modified()?,
            is_directory: metadata.is_dir(),
            size: metadata.len(),
        })
    }

    /// Path of the candidate.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
