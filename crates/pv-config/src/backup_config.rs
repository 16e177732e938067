use crate::DEFAULT_BACKUP_ENABLED;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Keep a copy of the last good record per user, used to restore corrupt records.
    pub enabled: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_BACKUP_ENABLED,
        }
    }
}
