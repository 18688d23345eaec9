//! Run outcome and statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OperationError;

/// Aggregated results of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Root that was processed.
    pub root: PathBuf,
    /// Regular files visited.
    pub files_visited: u64,
    /// Files rejected by the extension filter.
    pub files_filtered: u64,
    /// Files older than the cutoff.
    pub files_expired: u64,
    /// Files deleted.
    pub files_deleted: u64,
    /// Expired files the operator declined.
    pub files_skipped: u64,
    /// Deletions that failed.
    pub files_failed: u64,
    /// Bytes freed by successful deletions.
    pub bytes_freed: u64,
    /// Empty subdirectories removed after the walk.
    pub dirs_pruned: u64,
    /// Duration of the run.
    pub duration: Duration,
    /// Per-file errors encountered.
    pub errors: Vec<OperationError>,
}

impl RunOutcome {
    /// Create an empty outcome for a root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Record a visited regular file.
    pub fn record_visit(&mut self) {
        self.files_visited += 1;
    }

    /// Record a file rejected by the extension filter.
    pub fn record_filtered(&mut self) {
        self.files_filtered += 1;
    }

    /// Record a file older than the cutoff.
    pub fn record_expired(&mut self) {
        self.files_expired += 1;
    }

    /// Record a successful deletion.
    pub fn record_deleted(&mut self, bytes: u64) {
        self.files_deleted += 1;
        self.bytes_freed += bytes;
    }

    /// Record a declined deletion.
    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    /// Record a failed deletion.
    pub fn record_failure(&mut self, error: OperationError) {
        self.files_failed += 1;
        self.errors.push(error);
    }

    /// Record a pruned directory.
    pub fn record_pruned(&mut self) {
        self.dirs_pruned += 1;
    }

    /// Record a non-fatal error that is not tied to a file deletion.
    pub fn record_error(&mut self, error: OperationError) {
        self.errors.push(error);
    }

    /// Check if any per-file errors occurred.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
