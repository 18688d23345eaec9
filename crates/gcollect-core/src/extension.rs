//! Extension pre-filter applied to regular files before the age check.

use std::path::Path;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Set of accepted file extensions. Empty accepts every file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFilter {
    extensions: Vec<CompactString>,
}

impl ExtensionFilter {
    /// A filter that accepts every file.
    pub fn any() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list such as `jpg,.PNG, gif`.
    ///
    /// Entries are trimmed, lowercased and stripped of leading dots. Blank
    /// entries are dropped.
    pub fn parse(list: &str) -> Self {
        let mut extensions: Vec<CompactString> = Vec::new();
        for raw in list.split(',') {
            let ext = raw.trim().trim_start_matches('.');
            if ext.is_empty() {
                continue;
            }
            let ext = CompactString::new(ext.to_lowercase());
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        Self { extensions }
    }

    /// Whether this filter accepts everything.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Accepted extensions, normalized.
    pub fn extensions(&self) -> &[CompactString] {
        &self.extensions
    }

    /// Check whether a file path passes the filter (case-insensitive).
    pub fn matches(&self, path: &Path) -> bool {
        if self.is_empty() {
            return true;
        }
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| e.as_str() == ext)
            }
            None => false,
        }
    }
}
