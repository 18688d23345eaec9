//! Per-entry traversal decisions.

use std::fs::FileType;

/// What the walker does with one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Enter the directory. Directories are never deletion candidates.
    Descend,
    /// Neither enter nor evaluate.
    SkipSubtree,
    /// Run the entry through the filters and the gate.
    Evaluate,
}

impl Visit {
    /// Decide for an entry at `depth` (the root is depth 0).
    ///
    /// Symlinks and special files are never followed and never deleted.
    pub fn decide(file_type: FileType, depth: usize, recursive: bool) -> Self {
        if file_type.is_dir() {
            if depth == 0 || recursive {
                Self::Descend
            } else {
                Self::SkipSubtree
            }
        } else if file_type.is_file() {
            Self::Evaluate
        } else {
            Self::SkipSubtree
        }
    }

    /// Whether the walker should read this entry's children.
    pub fn descends(&self) -> bool {
        matches!(self, Self::Descend)
    }
}
