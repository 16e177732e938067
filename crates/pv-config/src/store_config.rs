use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BACKUP_DIRECTORY, DEFAULT_QUARANTINE_DIRECTORY,
    DEFAULT_RECORD_FILENAME, DEFAULT_STORE_ROOT, DEFAULT_USERS_DIRECTORY,
};

use std::path::Path;

use serde::Deserialize;

/// On-disk layout of the profile store.
///
/// ```text
/// <root>/<users_dir>/<user-id>/<record_filename>
/// <root>/<backup_dir>/<user-id>.json
/// <root>/<quarantine_dir>/<user-id>/...
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store root. Relative paths resolve against the config directory.
    pub root: String,
    pub users_dir: String,
    pub record_filename: String,
    pub backup_dir: String,
    pub quarantine_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: String::from(DEFAULT_STORE_ROOT),
            users_dir: String::from(DEFAULT_USERS_DIRECTORY),
            record_filename: String::from(DEFAULT_RECORD_FILENAME),
            backup_dir: String::from(DEFAULT_BACKUP_DIRECTORY),
            quarantine_dir: String::from(DEFAULT_QUARANTINE_DIRECTORY),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.root.trim().is_empty() {
            return Err(ConfigError::store("store.root cannot be empty"));
        }
        if !Path::new(&self.root).is_absolute() && self.root.contains("..") {
            return Err(ConfigError::store(
                "store.root must be absolute or a relative path without '..'",
            ));
        }

        for (key, value) in [
            ("store.users_dir", &self.users_dir),
            ("store.record_filename", &self.record_filename),
            ("store.backup_dir", &self.backup_dir),
            ("store.quarantine_dir", &self.quarantine_dir),
        ] {
            validate_plain_name(key, value)?;
        }

        if !self.record_filename.ends_with(".json") {
            return Err(ConfigError::store(format!(
                "store.record_filename must end with .json, got {:?}",
                self.record_filename
            )));
        }

        let dirs = [&self.users_dir, &self.backup_dir, &self.quarantine_dir];
        for (i, a) in dirs.iter().enumerate() {
            if dirs[i + 1..].contains(a) {
                return Err(ConfigError::store(format!(
                    "store directories must be distinct, {a:?} is used twice"
                )));
            }
        }

        Ok(())
    }
}

fn validate_plain_name(key: &str, value: &str) -> ConfigErrorResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::store(format!("{key} cannot be empty")));
    }
    if value == "." || value.contains("..") || value.contains(['/', '\\']) {
        return Err(ConfigError::store(format!(
            "{key} must be a single path component without '..', got {value:?}"
        )));
    }
    Ok(())
}
