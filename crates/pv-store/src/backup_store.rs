use crate::record_store::write_atomically;
use crate::{StorePaths, StoreError, StoreResult};

use pv_core::UserId;

use std::fs;
use std::io::ErrorKind;

/// Latest known-good copy of each user's record.
#[derive(Debug, Clone)]
pub struct BackupStore {
    paths: StorePaths,
}

impl BackupStore {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    pub fn save(&self, id: &UserId, text: &str) -> StoreResult<()> {
        let dir = self.paths.backup_root();
        fs::create_dir_all(&dir).map_err(|e| StoreError::directory(dir, e))?;
        write_atomically(&self.paths.backup_path(id), text.as_bytes())
    }

    /// The backup text, or `None` if there is no backup.
    pub fn load_raw(&self, id: &UserId) -> StoreResult<Option<String>> {
        let path = self.paths.backup_path(id);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::unreadable(path, e)),
        }
    }

    pub fn remove(&self, id: &UserId) -> StoreResult<()> {
        let path = self.paths.backup_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::write_failure(path, e)),
        }
    }
}
