use gcollect_core::{ExtensionFilter, RunError, TraversalConfig};
use gcollect_ops::{
    ConfirmationGate, RecordingReporter, ReportEvent, ResponseSource, ScriptedResponses,
};
use gcollect_scan::{RunOutcome, Walker};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn write_aged(path: &Path, days_old: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "some cached bytes").unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - DAY * days_old).unwrap();
}

/// root/
///   top_old.tmp     (100 days)
///   top_new.tmp     (1 day)
///   level1/
///     mid_old.tmp   (100 days)
///     level2/
///       deep_old.tmp (100 days)
///       deep_new.tmp (1 day)
fn create_test_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write_aged(&root.join("top_old.tmp"), 100);
    write_aged(&root.join("top_new.tmp"), 1);
    write_aged(&root.join("level1/mid_old.tmp"), 100);
    write_aged(&root.join("level1/level2/deep_old.tmp"), 100);
    write_aged(&root.join("level1/level2/deep_new.tmp"), 1);

    temp
}

fn config(root: &Path, recursive: bool) -> TraversalConfig {
    TraversalConfig::builder()
        .root(root)
        .recursive(recursive)
        .expire_days(90u64)
        .auto_confirm(true)
        .build()
        .unwrap()
}

fn run_with(
    config: &TraversalConfig,
    answers: &[&str],
) -> (Result<RunOutcome, RunError>, RecordingReporter) {
    let mut gate = ConfirmationGate::new(config, ScriptedResponses::new(answers.iter().copied()));
    let mut reporter = RecordingReporter::new();
    let result = Walker::new(config).run(&mut gate, &mut reporter);
    (result, reporter)
}

fn canonical(path: PathBuf) -> PathBuf {
    path.canonicalize().unwrap()
}

#[test]
fn test_non_recursive_stays_at_first_level() {
    let temp = create_test_tree();
    let root = temp.path();

    let (result, reporter) = run_with(&config(root, false), &[]);
    let outcome = result.unwrap();

    assert_eq!(outcome.files_visited, 2);
    assert_eq!(outcome.files_deleted, 1);
    assert!(!root.join("top_old.tmp").exists());
    assert!(root.join("top_new.tmp").exists());
    assert!(root.join("level1/mid_old.tmp").exists());
    assert!(root.join("level1/level2/deep_old.tmp").exists());

    for event in &reporter.events {
        if let ReportEvent::Deleting(path) = event {
            assert!(!path.starts_with(canonical(root.join("level1"))));
        }
    }
}

#[test]
fn test_recursive_visits_each_expired_file_once() {
    let temp = create_test_tree();
    let root = temp.path();

    let (result, reporter) = run_with(&config(root, true), &[]);
    let outcome = result.unwrap();

    assert_eq!(outcome.files_visited, 5);
    assert_eq!(outcome.files_expired, 3);
    assert_eq!(outcome.files_deleted, 3);

    let announced: Vec<&PathBuf> = reporter
        .events
        .iter()
        .filter_map(|e| match e {
            ReportEvent::Deleting(p) => Some(p),
            _ => None,
        })
        .collect();
    let unique: HashSet<&PathBuf> = announced.iter().copied().collect();
    assert_eq!(announced.len(), 3);
    assert_eq!(unique.len(), 3);

    assert!(root.join("top_new.tmp").exists());
    assert!(root.join("level1/level2/deep_new.tmp").exists());
    assert!(!root.join("level1/level2/deep_old.tmp").exists());
    assert!(root.join("level1/level2").is_dir());
}

#[test]
fn test_silent_cache_scenario() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("cache");
    write_aged(&root.join("a.tmp"), 100);
    write_aged(&root.join("b.tmp"), 1);

    let mut config = config(&root, false);
    config.silent = true;

    let (result, reporter) = run_with(&config, &[]);
    result.unwrap();

    assert!(!root.join("a.tmp").exists());
    assert!(root.join("b.tmp").exists());
    assert_eq!(reporter.deleted_paths().len(), 1);
    assert!(
        !reporter
            .events
            .iter()
            .any(|e| matches!(e, ReportEvent::Deleting(_)))
    );
    assert!(reporter.is_done());
}

#[test]
fn test_single_file_root_interactive() {
    let temp = TempDir::new().unwrap();
    let kept = temp.path().join("kept.log");
    let removed = temp.path().join("removed.log");
    write_aged(&kept, 200);
    write_aged(&removed, 200);

    let interactive = TraversalConfig::new(&removed);
    let (result, reporter) = run_with(&interactive, &["yes\n"]);
    assert_eq!(result.unwrap().files_deleted, 1);
    assert!(!removed.exists());
    assert!(reporter.is_done());

    let interactive = TraversalConfig::new(&kept);
    let (result, reporter) = run_with(&interactive, &["no\n"]);
    let outcome = result.unwrap();
    assert_eq!(outcome.files_deleted, 0);
    assert_eq!(outcome.files_skipped, 1);
    assert!(kept.exists());
    let kept = canonical(kept);
    assert_eq!(reporter.skipped_paths(), vec![kept.as_path()]);
}

#[test]
fn test_declined_prompts_never_delete() {
    let temp = create_test_tree();
    let root = temp.path();

    let mut config = config(root, true);
    config.auto_confirm = false;

    let (result, reporter) = run_with(&config, &["n", "", "nope"]);
    let outcome = result.unwrap();

    assert_eq!(outcome.files_deleted, 0);
    assert_eq!(outcome.files_skipped, 3);
    assert_eq!(reporter.skipped_paths().len(), 3);
    assert!(root.join("top_old.tmp").exists());
    assert!(root.join("level1/mid_old.tmp").exists());
    assert!(root.join("level1/level2/deep_old.tmp").exists());
}

#[test]
fn test_fresh_single_file_is_not_prompted() {
    let temp = TempDir::new().unwrap();
    let fresh = temp.path().join("fresh.log");
    write_aged(&fresh, 1);

    let config = TraversalConfig::new(&fresh);
    let mut gate = ConfirmationGate::new(&config, ScriptedResponses::new(["yes"]));
    let mut reporter = RecordingReporter::new();
    Walker::new(&config).run(&mut gate, &mut reporter).unwrap();

    assert!(fresh.exists());
    assert!(gate.into_responses().prompts.is_empty());
}

#[test]
fn test_zero_expiry_removes_fresh_files() {
    let temp = create_test_tree();
    let root = temp.path();

    let mut config = config(root, true);
    config.expire_days = 0;
    let (result, _) = run_with(&config, &[]);

    assert_eq!(result.unwrap().files_deleted, 5);
    assert!(root.join("level1/level2").is_dir());
}

#[test]
fn test_extension_filter_selects_matching_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_aged(&root.join("photo.JPG"), 120);
    write_aged(&root.join("notes.txt"), 120);

    let mut config = config(root, false);
    config.extensions = ExtensionFilter::parse("jpg,png");
    let (result, _) = run_with(&config, &[]);
    let outcome = result.unwrap();

    assert!(!root.join("photo.JPG").exists());
    assert!(root.join("notes.txt").exists());
    assert_eq!(outcome.files_filtered, 1);
}

#[test]
fn test_prune_removes_emptied_directories() {
    let temp = create_test_tree();
    let root = temp.path();
    write_aged(&root.join("other/only_old.tmp"), 300);

    let mut config = config(root, true);
    config.prune_empty_dirs = true;
    let (result, reporter) = run_with(&config, &[]);
    let outcome = result.unwrap();

    assert!(!root.join("other").exists());
    assert!(root.join("level1/level2").is_dir());
    assert!(root.exists());
    assert_eq!(outcome.dirs_pruned, 1);
    assert!(
        reporter
            .events
            .iter()
            .any(|e| matches!(e, ReportEvent::DirPruned(_)))
    );
}

#[test]
fn test_prune_is_ignored_without_recursion() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("empty")).unwrap();

    let mut config = config(root, false);
    config.prune_empty_dirs = true;
    let (result, _) = run_with(&config, &[]);

    assert_eq!(result.unwrap().dirs_pruned, 0);
    assert!(root.join("empty").is_dir());
}

/// Answers "yes" and removes another file while the operator is "thinking".
struct RemovingResponses {
    victim: PathBuf,
}

impl ResponseSource for RemovingResponses {
    fn respond(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        if self.victim.exists() {
            fs::remove_file(&self.victim)?;
        }
        Ok(Some("yes".to_string()))
    }
}

#[test]
fn test_file_removed_during_prompt_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_aged(&root.join("a.tmp"), 100);
    write_aged(&root.join("b.tmp"), 100);

    let config = TraversalConfig::new(root);
    let mut gate = ConfirmationGate::new(
        &config,
        RemovingResponses {
            victim: root.join("b.tmp"),
        },
    );
    let mut reporter = RecordingReporter::new();
    let outcome = Walker::new(&config).run(&mut gate, &mut reporter).unwrap();

    assert_eq!(outcome.files_deleted, 1);
    assert!(!root.join("a.tmp").exists());
    assert!(!root.join("b.tmp").exists());
    assert!(reporter.is_done());
}

#[cfg(unix)]
#[test]
#[ignore = "needs an unprivileged user: cargo test -- --ignored as non-root"]
fn test_unreadable_directory_aborts_run() {
    use std::os::unix::fs::PermissionsExt;

    let temp = create_test_tree();
    let locked = temp.path().join("level1/level2");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let readable = fs::read_dir(&locked).is_ok();
    if readable {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }
    assert!(!readable, "permissions are not enforced for this user");

    let (result, reporter) = run_with(&config(temp.path(), true), &[]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(RunError::WalkFailure { .. })));
    assert!(!reporter.is_done());
}

#[cfg(unix)]
#[test]
#[ignore = "needs an unprivileged user: cargo test -- --ignored as non-root"]
fn test_delete_failure_does_not_stop_walk() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_aged(&root.join("a_locked/old.tmp"), 100);
    write_aged(&root.join("b_open/old.tmp"), 100);

    let locked = root.join("a_locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    let writable = fs::write(locked.join("marker"), "x").is_ok();
    if writable {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }
    assert!(!writable, "permissions are not enforced for this user");

    let (result, reporter) = run_with(&config(root, true), &[]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let outcome = result.unwrap();

    assert_eq!(outcome.files_failed, 1);
    assert_eq!(outcome.files_deleted, 1);
    assert!(root.join("a_locked/old.tmp").exists());
    assert!(!root.join("b_open/old.tmp").exists());
    assert!(
        reporter
            .events
            .iter()
            .any(|e| matches!(e, ReportEvent::DeleteFailed(_)))
    );
    assert!(reporter.is_done());
}
