//! Progress and result reporting.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use humansize::{BINARY, format_size};
use tracing::debug;

use gcollect_core::{OperationError, RunError, RunOutcome};

/// Sink for everything the operator sees during a run.
pub trait Reporter {
    /// The operator declined a deletion.
    fn skipped(&mut self, path: &Path);

    /// An auto-confirmed deletion is about to happen.
    fn deleting(&mut self, path: &Path);

    /// A file was deleted.
    fn deleted(&mut self, path: &Path, bytes: u64);

    /// A deletion failed. The run continues.
    fn delete_failed(&mut self, error: &OperationError);

    /// An emptied directory was removed.
    fn dir_pruned(&mut self, path: &Path);

    /// The run is aborting.
    fn fatal(&mut self, error: &RunError);

    /// The run finished.
    fn done(&mut self, outcome: &RunOutcome);
}

/// How the final summary is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// `Done.` plus a one-line summary.
    #[default]
    Text,
    /// `Done.` on the error stream, the outcome as JSON on the output stream.
    Json,
}

/// Writes progress to one stream and errors to another.
pub struct ConsoleReporter<O: Write, E: Write> {
    out: O,
    err: E,
    format: SummaryFormat,
}

impl ConsoleReporter<io::Stdout, io::Stderr> {
    /// Report to standard output and standard error.
    pub fn stdio(format: SummaryFormat) -> Self {
        Self::new(io::stdout(), io::stderr(), format)
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    /// Create a reporter over arbitrary writers.
    pub fn new(out: O, err: E, format: SummaryFormat) -> Self {
        Self { out, err, format }
    }

    /// Print a red `ERROR:` line on the error stream.
    pub fn error_line(&mut self, message: impl std::fmt::Display) {
        let _ = writeln!(self.err, "{}{}", "ERROR: ".red().bold(), message);
    }

    /// Consume the reporter, returning its writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Reporter for ConsoleReporter<O, E> {
    fn skipped(&mut self, path: &Path) {
        let _ = writeln!(self.out, "Skipped {}", path.display());
    }

    fn deleting(&mut self, path: &Path) {
        let _ = writeln!(self.out, "Deleting {}...", path.display());
    }

    fn deleted(&mut self, path: &Path, bytes: u64) {
        debug!(path = %path.display(), bytes, "deleted");
    }

    fn delete_failed(&mut self, error: &OperationError) {
        self.error_line(format_args!(
            "Failed to delete {}: {}",
            error.path.display(),
            error.message
        ));
    }

    fn dir_pruned(&mut self, path: &Path) {
        let _ = writeln!(self.out, "Removed empty directory {}", path.display());
    }

    fn fatal(&mut self, error: &RunError) {
        self.error_line(error);
    }

    fn done(&mut self, outcome: &RunOutcome) {
        match self.format {
            SummaryFormat::Text => {
                let _ = writeln!(self.out, "Done.");
                let _ = writeln!(self.out, "{}", summary(outcome));
            }
            SummaryFormat::Json => {
                let _ = writeln!(self.err, "Done.");
                match serde_json::to_string_pretty(outcome) {
                    Ok(json) => {
                        let _ = writeln!(self.out, "{json}");
                    }
                    Err(e) => self.error_line(format_args!("Failed to encode summary: {e}")),
                }
            }
        }
        let _ = self.out.flush();
    }
}

/// One-line human-readable summary of an outcome.
pub fn summary(outcome: &RunOutcome) -> String {
    let mut line = format!(
        "{} deleted ({} freed), {} skipped, {} failed",
        outcome.files_deleted,
        format_size(outcome.bytes_freed, BINARY),
        outcome.files_skipped,
        outcome.files_failed
    );
    if outcome.dirs_pruned > 0 {
        line.push_str(&format!(", {} empty directories removed", outcome.dirs_pruned));
    }
    line
}

/// A reported event, as captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Skipped(PathBuf),
    Deleting(PathBuf),
    Deleted(PathBuf),
    DeleteFailed(PathBuf),
    DirPruned(PathBuf),
    Fatal(String),
    Done,
}

/// Reporter that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Events in the order they were reported.
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths reported as deleted.
    pub fn deleted_paths(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Deleted(p) => Some(p.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Paths reported as skipped.
    pub fn skipped_paths(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Skipped(p) => Some(p.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Whether the run reported completion.
    pub fn is_done(&self) -> bool {
        self.events.last() == Some(&ReportEvent::Done)
    }
}

impl Reporter for RecordingReporter {
    fn skipped(&mut self, path: &Path) {
        self.events.push(ReportEvent::Skipped(path.to_path_buf()));
    }

    fn deleting(&mut self, path: &Path) {
        self.events.push(ReportEvent::Deleting(path.to_path_buf()));
    }

    fn deleted(&mut self, path: &Path, _bytes: u64) {
        self.events.push(ReportEvent::Deleted(path.to_path_buf()));
    }

    fn delete_failed(&mut self, error: &OperationError) {
        self.events.push(ReportEvent::DeleteFailed(error.path.clone()));
    }

    fn dir_pruned(&mut self, path: &Path) {
        self.events.push(ReportEvent::DirPruned(path.to_path_buf()));
    }

    fn fatal(&mut self, error: &RunError) {
        self.events.push(ReportEvent::Fatal(error.to_string()));
    }

    fn done(&mut self, _outcome: &RunOutcome) {
        self.events.push(ReportEvent::Done);
    }
}
