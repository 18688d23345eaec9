//! Traversal engine for gcollect.
//!
//! Walks a single root, strictly in sequence, deciding per entry whether to
//! descend, skip or evaluate. Evaluated files go through the extension filter,
//! the age cutoff and the confirmation gate before being deleted.
//!
//! # Example
//!
//! ```rust,no_run
//! use gcollect_core::TraversalConfig;
//! use gcollect_ops::{ConfirmationGate, ConsoleReporter, StdinResponses, SummaryFormat};
//! use gcollect_scan::Walker;
//!
//! let config = TraversalConfig::builder()
//!     .root("/var/www/project/data/cache")
//!     .recursive(true)
//!     .expire_days(60u64)
//!     .build()
//!     .unwrap();
//!
//! let mut gate = ConfirmationGate::new(&config, StdinResponses);
//! let mut reporter = ConsoleReporter::stdio(SummaryFormat::Text);
//! let outcome = Walker::new(&config).run(&mut gate, &mut reporter).unwrap();
//!
//! println!("Deleted {} files", outcome.files_deleted);
//! ```

mod visit;
mod walker;

pub use visit::Visit;
pub use walker::Walker;

// Re-export core types for convenience
pub use gcollect_core::{RunError, RunOutcome, TraversalConfig};
