//! Whole-file load and save of user records. Callers hold the gate.

use crate::{StorePaths, StoreError, StoreResult};

use pv_core::{Record, UserId};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct RecordStore {
    paths: StorePaths,
}

impl RecordStore {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn exists(&self, id: &UserId) -> bool {
        self.paths.record_path(id).is_file()
    }

    /// Reads the record file as text without interpreting it.
    pub fn load_raw(&self, id: &UserId) -> StoreResult<String> {
        let path = self.paths.record_path(id);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::not_found(id.as_str(), path))
            }
            Err(e) => Err(StoreError::unreadable(path, e)),
        }
    }

    /// Reads and parses a record. Never returns a partial record.
    pub fn load(&self, id: &UserId) -> StoreResult<Record> {
        let text = self.load_raw(id)?;
        Record::parse(&text)
            .map_err(|e| StoreError::unparsable(self.paths.record_path(id), e.to_string()))
    }

    /// Serializes the whole record and replaces the file in one step.
    pub fn save(&self, id: &UserId, record: &Record) -> StoreResult<String> {
        let text = record.to_canonical()?;
        self.save_raw(id, &text)?;
        Ok(text)
    }

    /// Atomically replaces the record file with `text`. The user directory must exist.
    pub fn save_raw(&self, id: &UserId, text: &str) -> StoreResult<()> {
        write_atomically(&self.paths.record_path(id), text.as_bytes())
    }

    pub fn delete(&self, id: &UserId) -> StoreResult<bool> {
        let path = self.paths.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::write_failure(path, e)),
        }
    }
}

/// Atomic write pattern.
///
/// 1. Writes to a temp file next to `path`
/// 2. Syncs to disk (fsync)
/// 3. Renames over `path`
///
/// Readers see either the old file or the new one, never a mix.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(
        "{file_name}.tmp.{}.{}",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    if let Err(e) = write_synced(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::write_failure(temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        // Clean up temp file on failure
        let _ = fs::remove_file(&temp_path);
        StoreError::write_failure(path.to_path_buf(), e)
    })
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
