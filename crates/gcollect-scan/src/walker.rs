//! Serial depth-first walker built on jwalk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info};

use gcollect_core::{
    Cutoff, FileCandidate, PathKind, RunError, RunOutcome, TraversalConfig, ValidatedRoot,
    validate_root,
};
use gcollect_ops::{ConfirmationGate, Decision, Reporter, ResponseSource, delete_file, remove_empty_dir};

use crate::visit::Visit;

/// Walks a root and deletes expired files.
pub struct Walker<'a> {
    config: &'a TraversalConfig,
    reference_time: SystemTime,
}

impl<'a> Walker<'a> {
    /// Create a walker for a config. The cutoff is computed from the current time.
    pub fn new(config: &'a TraversalConfig) -> Self {
        Self {
            config,
            reference_time: SystemTime::now(),
        }
    }

    /// Compute the cutoff relative to `reference_time` instead of now.
    pub fn with_reference_time(mut self, reference_time: SystemTime) -> Self {
        self.reference_time = reference_time;
        self
    }

    /// Perform a run.
    ///
    /// Per-file deletion failures are reported and counted. Root rejection,
    /// unreadable directories and prompt failures end the run with an error;
    /// reporting those is left to the caller.
    pub fn run<R: ResponseSource>(
        &self,
        gate: &mut ConfirmationGate<R>,
        reporter: &mut dyn Reporter,
    ) -> Result<RunOutcome, RunError> {
        let start = Instant::now();
        let root = validate_root(&self.config.root)?;
        let cutoff = Cutoff::from_days_at(self.config.expire_days, self.reference_time);

        info!(
            root = %root.path.display(),
            recursive = self.config.recursive,
            cutoff = %cutoff,
            "starting run"
        );

        let mut outcome = RunOutcome::new(&root.path);
        let mut pass = Pass {
            config: self.config,
            cutoff,
            gate,
            reporter: &mut *reporter,
            outcome: &mut outcome,
        };

        match root.kind {
            PathKind::File => pass.evaluate_root_file(&root)?,
            PathKind::Directory => {
                let descended = pass.walk_directory(&root)?;
                if self.config.should_prune() {
                    pass.prune(descended);
                }
            }
        }

        outcome.duration = start.elapsed();
        reporter.done(&outcome);
        Ok(outcome)
    }
}

/// State for a single run.
struct Pass<'r, R> {
    config: &'r TraversalConfig,
    cutoff: Cutoff,
    gate: &'r mut ConfirmationGate<R>,
    reporter: &'r mut dyn Reporter,
    outcome: &'r mut RunOutcome,
}

impl<R: ResponseSource> Pass<'_, R> {
    fn evaluate_root_file(&mut self, root: &ValidatedRoot) -> Result<(), RunError> {
        let metadata = fs::metadata(&root.path).map_err(|e| RunError::walk(&root.path, e))?;
        let candidate =
            FileCandidate::from_metadata(&root.path, &metadata).map_err(|e| RunError::walk(&root.path, e))?;
        self.evaluate(candidate)
    }

    /// Walk the directory tree, returning the subdirectories that were entered.
    fn walk_directory(&mut self, root: &ValidatedRoot) -> Result<Vec<(usize, PathBuf)>, RunError> {
        let recursive = self.config.recursive;

        let walker = WalkDir::new(&root.path)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(0)
            .process_read_dir(move |_depth, _path, _state, children| {
                children.iter_mut().for_each(|child| {
                    if let Ok(entry) = child {
                        if !Visit::decide(entry.file_type, entry.depth, recursive).descends() {
                            entry.read_children_path = None;
                        }
                    }
                });
            });

        let mut descended = Vec::new();

        for entry_result in walker {
            let mut entry = entry_result.map_err(|err| walk_error(err, &root.path))?;
            let path = entry.path();
            let depth = entry.depth();
            check_readable(&path, entry.read_children_error.take())?;

            match Visit::decide(entry.file_type(), depth, recursive) {
                Visit::Descend => {
                    if depth > 0 {
                        debug!(path = %path.display(), "descending");
                        descended.push((depth, path));
                    }
                }
                Visit::SkipSubtree => {
                    debug!(path = %path.display(), "skipping subtree");
                }
                Visit::Evaluate => {
                    let metadata = match entry.metadata() {
                        Ok(metadata) => metadata,
                        Err(err) if err.io_error().is_some_and(is_vanished) => {
                            debug!(path = %path.display(), "removed since listing");
                            continue;
                        }
                        Err(err) => return Err(walk_error(err, &path)),
                    };
                    let candidate = match FileCandidate::from_metadata(&path, &metadata) {
                        Ok(candidate) => candidate,
                        Err(err) if is_vanished(&err) => {
                            debug!(path = %path.display(), "removed since listing");
                            continue;
                        }
                        Err(err) => return Err(RunError::walk(&path, err)),
                    };
                    self.evaluate(candidate)?;
                }
            }
        }

        Ok(descended)
    }

    /// Run one regular file through the filters, the gate and deletion.
    fn evaluate(&mut self, candidate: FileCandidate) -> Result<(), RunError> {
        self.outcome.record_visit();

        if !self.config.extensions.matches(candidate.path()) {
            debug!(path = %candidate.path().display(), "extension filtered");
            self.outcome.record_filtered();
            return Ok(());
        }

        if !self.cutoff.is_expired(candidate.modified_at) {
            debug!(path = %candidate.path().display(), "not expired");
            return Ok(());
        }
        self.outcome.record_expired();

        match self.gate.approve(&candidate, &mut *self.reporter)? {
            Decision::Skip => self.outcome.record_skipped(),
            Decision::Delete => match delete_file(&candidate) {
                Ok(bytes) => {
                    self.reporter.deleted(candidate.path(), bytes);
                    self.outcome.record_deleted(bytes);
                }
                Err(error) => {
                    self.reporter.delete_failed(&error);
                    self.outcome.record_failure(error);
                }
            },
        }

        Ok(())
    }

    /// Remove subdirectories left empty, deepest first. The root is never touched.
    fn prune(&mut self, mut descended: Vec<(usize, PathBuf)>) {
        descended.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, dir) in descended {
            match remove_empty_dir(&dir) {
                Ok(true) => {
                    self.reporter.dir_pruned(&dir);
                    self.outcome.record_pruned();
                }
                Ok(false) => {}
                Err(error) => {
                    self.reporter.delete_failed(&error);
                    self.outcome.record_error(error);
                }
            }
        }
    }
}

/// A directory whose children could not be listed ends the run.
fn check_readable(path: &Path, read_error: Option<jwalk::Error>) -> Result<(), RunError> {
    match read_error {
        Some(err) => Err(walk_error(err, path)),
        None => Ok(()),
    }
}

fn is_vanished(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::NotFound
}

fn walk_error(err: jwalk::Error, fallback: &Path) -> RunError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    RunError::walk(path, std::io::Error::other(err.to_string()))
}
