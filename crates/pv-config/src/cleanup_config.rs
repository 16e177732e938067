use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CLEANUP_MIN_ENTRIES, DEFAULT_PLACEHOLDER_MARKER,
};

use serde::Deserialize;

/// Startup sweep of abandoned user directories.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Directories with fewer entries than this are considered abandoned.
    pub min_entries: usize,
    /// Directories whose name contains this marker are placeholders.
    pub placeholder_marker: String,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            min_entries: DEFAULT_CLEANUP_MIN_ENTRIES,
            placeholder_marker: String::from(DEFAULT_PLACEHOLDER_MARKER),
        }
    }
}

impl CleanupConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.min_entries == 0 {
            return Err(ConfigError::cleanup("cleanup.min_entries must be at least 1"));
        }
        if self.placeholder_marker.trim().is_empty() {
            return Err(ConfigError::cleanup(
                "cleanup.placeholder_marker cannot be empty",
            ));
        }
        Ok(())
    }
}
