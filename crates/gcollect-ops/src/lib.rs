//! File operations for gcollect.
//!
//! This crate holds everything that happens to a candidate once the walker
//! has selected it: asking for confirmation, deleting it, and telling the
//! operator what happened.

mod delete;
mod gate;
mod report;

pub use delete::{delete_file, remove_empty_dir};
pub use gate::{
    ConfirmationGate, Decision, ResponseSource, ScriptedResponses, StdinResponses, is_affirmative,
};
pub use report::{ConsoleReporter, RecordingReporter, ReportEvent, Reporter, SummaryFormat, summary};
