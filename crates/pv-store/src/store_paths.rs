use pv_config::Config;
use pv_config::ConfigErrorResult;
use pv_core::UserId;

use std::path::{Path, PathBuf};

const DEFAULT_USERS_DIRECTORY: &str = "users";
const DEFAULT_RECORD_FILENAME: &str = "userdata.json";
const DEFAULT_BACKUP_DIRECTORY: &str = "backup";
const DEFAULT_QUARANTINE_DIRECTORY: &str = "quarantine";

/// Resolves where every piece of the store lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    root: PathBuf,
    users_dir: String,
    backup_dir: String,
    quarantine_dir: String,
    record_filename: String,
}

impl StorePaths {
    /// Default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            users_dir: String::from(DEFAULT_USERS_DIRECTORY),
            backup_dir: String::from(DEFAULT_BACKUP_DIRECTORY),
            quarantine_dir: String::from(DEFAULT_QUARANTINE_DIRECTORY),
            record_filename: String::from(DEFAULT_RECORD_FILENAME),
        }
    }

    pub fn from_config(config: &Config) -> ConfigErrorResult<Self> {
        Ok(Self::with_root(config, config.store_root()?))
    }

    /// Layout from `config` but rooted at `root` (used by `--root`).
    pub fn with_root(config: &Config, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            users_dir: config.store.users_dir.clone(),
            backup_dir: config.store.backup_dir.clone(),
            quarantine_dir: config.store.quarantine_dir.clone(),
            record_filename: config.store.record_filename.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn users_root(&self) -> PathBuf {
        self.root.join(&self.users_dir)
    }

    pub fn record_filename(&self) -> &str {
        &self.record_filename
    }

    pub fn user_dir(&self, id: &UserId) -> PathBuf {
        self.users_root().join(id.as_str())
    }

    pub fn record_path(&self, id: &UserId) -> PathBuf {
        self.user_dir(id).join(&self.record_filename)
    }

    pub fn backup_root(&self) -> PathBuf {
        self.root.join(&self.backup_dir)
    }

    pub fn backup_path(&self, id: &UserId) -> PathBuf {
        self.backup_root().join(format!("{id}.json"))
    }

    pub fn quarantine_dir_for(&self, id: &UserId) -> PathBuf {
        self.root.join(&self.quarantine_dir).join(id.as_str())
    }
}
