//! Run configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::age::DEFAULT_EXPIRE_DAYS;
use crate::error::ConfigError;
use crate::extension::ExtensionFilter;

/// Configuration for one collection run.
///
/// Built once at startup and passed by reference to every component.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct TraversalConfig {
    /// Root path: a single file or a directory.
    pub root: PathBuf,

    /// Descend into subdirectories.
    #[builder(default = "false")]
    #[serde(default)]
    pub recursive: bool,

    /// Extension pre-filter (empty = all files).
    #[builder(default)]
    #[serde(default)]
    pub extensions: ExtensionFilter,

    /// Files older than this many days are deleted. 0 selects every file.
    #[builder(default = "DEFAULT_EXPIRE_DAYS")]
    #[serde(default = "default_expire_days")]
    pub expire_days: u64,

    /// Delete without prompting.
    #[builder(default = "false")]
    #[serde(default)]
    pub auto_confirm: bool,

    /// Suppress per-file announcements when auto-confirming.
    #[builder(default = "false")]
    #[serde(default)]
    pub silent: bool,

    /// Remove subdirectories emptied by a recursive run.
    #[builder(default = "false")]
    #[serde(default)]
    pub prune_empty_dirs: bool,
}

fn default_expire_days() -> u64 {
    DEFAULT_EXPIRE_DAYS
}

impl TraversalConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl From<TraversalConfigBuilderError> for ConfigError {
    fn from(err: TraversalConfigBuilderError) -> Self {
        ConfigError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl TraversalConfig {
    /// Create a new config builder.
    pub fn builder() -> TraversalConfigBuilder {
        TraversalConfigBuilder::default()
    }

    /// Create a config for a root with every other option at its default.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            extensions: ExtensionFilter::any(),
            expire_days: DEFAULT_EXPIRE_DAYS,
            auto_confirm: false,
            silent: false,
            prune_empty_dirs: false,
        }
    }

    /// Whether emptied subdirectories should be removed after the walk.
    ///
    /// Only meaningful when the walk actually descends.
    pub fn should_prune(&self) -> bool {
        self.recursive && self.prune_empty_dirs
    }
}
