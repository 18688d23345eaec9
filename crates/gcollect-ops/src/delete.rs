//! Deletion primitives.
//!
//! Each call is a single, non-atomic filesystem operation. Failures come back
//! as [`OperationError`] so the caller can report them and move on.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use gcollect_core::{FileCandidate, OperationError};

/// Remove a candidate file, returning the bytes freed.
pub fn delete_file(candidate: &FileCandidate) -> Result<u64, OperationError> {
    match fs::remove_file(candidate.path()) {
        Ok(()) => {
            debug!(path = %candidate.path().display(), "removed file");
            Ok(candidate.size)
        }
        Err(e) => {
            warn!(path = %candidate.path().display(), error = %e, "failed to remove file");
            Err(OperationError::new(candidate.path(), e.to_string()))
        }
    }
}

/// Remove a directory if it is empty.
///
/// Returns `Ok(false)` when the directory still has entries.
pub fn remove_empty_dir(path: &Path) -> Result<bool, OperationError> {
    let mut entries = fs::read_dir(path).map_err(|e| OperationError::new(path, e.to_string()))?;
    if entries.next().is_some() {
        return Ok(false);
    }

    match fs::remove_dir(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed empty directory");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => Ok(false),
        Err(e) => Err(OperationError::new(path, e.to_string())),
    }
}
