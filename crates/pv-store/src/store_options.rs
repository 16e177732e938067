use pv_config::Config;
use pv_core::FieldLookup;

use std::time::Duration;

/// Behavior switches for a [`ProfileStore`](crate::ProfileStore).
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub lookup: FieldLookup,
    /// `None` waits for the gate forever.
    pub acquire_timeout: Option<Duration>,
    pub backup_enabled: bool,
    pub keep_corrupted_copy: bool,
    pub archive_remaining: bool,
    pub min_entries: usize,
    pub placeholder_marker: String,
}

impl StoreOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            lookup: FieldLookup::from_lenient_flag(config.accessor.lenient_lookup),
            acquire_timeout: config.gate.acquire_timeout(),
            backup_enabled: config.backup.enabled,
            keep_corrupted_copy: config.quarantine.keep_corrupted_copy,
            archive_remaining: config.quarantine.archive_remaining,
            min_entries: config.cleanup.min_entries,
            placeholder_marker: config.cleanup.placeholder_marker.clone(),
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
