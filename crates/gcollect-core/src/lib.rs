//! Core types for gcollect.
//!
//! This crate holds the run configuration, the error taxonomy, root
//! validation and the age/extension selection rules shared by the
//! traversal and operations crates.

pub mod age;
mod candidate;
mod classify;
mod config;
mod error;
mod extension;
mod outcome;

pub use age::{Cutoff, DEFAULT_EXPIRE_DAYS, is_expired, parse_expire_days};
pub use candidate::{FileCandidate, PathKind};
pub use classify::{ValidatedRoot, is_too_shallow, validate_root};
pub use config::{TraversalConfig, TraversalConfigBuilder, TraversalConfigBuilderError};
pub use error::{ConfigError, OperationError, RootRejection, RunError};
pub use extension::ExtensionFilter;
pub use outcome::RunOutcome;
