use crate::{DEFAULT_ARCHIVE_REMAINING, DEFAULT_KEEP_CORRUPTED_COPY};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuarantineConfig {
    /// Move corrupt records into the quarantine directory instead of deleting them.
    pub keep_corrupted_copy: bool,
    /// Zip whatever is left in a corrupt user's directory.
    pub archive_remaining: bool,
}

impl Default for QuarantineConfig {
    fn default() -> Self {
        Self {
            keep_corrupted_copy: DEFAULT_KEEP_CORRUPTED_COPY,
            archive_remaining: DEFAULT_ARCHIVE_REMAINING,
        }
    }
}
