//! Handles records that cannot be loaded or migrated.
//!
//! The record is moved to quarantine (or deleted) and the backup is tried. If
//! the backup migrates cleanly it becomes the record again. Otherwise the user
//! directory is removed if it is now empty. Any entry left in it, even an
//! empty folder, is reported to the user instead.

use crate::audit_event::{self, AuditEvent};
use crate::{
    BackupStore, CorruptionReport, DATE_FORMAT, MigrationEngine, MigrationOutcome,
    MigrationReport, Notifier, RecordStore, StoreError, StoreOptions, StoreResult,
};

use pv_core::{Catalog, UserId};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

#[derive(Debug)]
pub enum CorruptionOutcome {
    /// The backup was valid and has been written back as the user's record.
    Restored(MigrationReport),
    /// Nothing else belonged to the user, so the directory is gone.
    DirectoryRemoved { user_dir: PathBuf },
    /// Files remain in the user directory.
    Reported(CorruptionReport),
}

pub struct CorruptionHandler<'a> {
    records: &'a RecordStore,
    backups: &'a BackupStore,
    catalog: &'a Catalog,
    options: &'a StoreOptions,
    notifier: &'a dyn Notifier,
}

impl<'a> CorruptionHandler<'a> {
    pub fn new(
        records: &'a RecordStore,
        backups: &'a BackupStore,
        catalog: &'a Catalog,
        options: &'a StoreOptions,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            records,
            backups,
            catalog,
            options,
            notifier,
        }
    }

    /// Caller must hold the store gate.
    pub fn handle(&self, id: &UserId, reason: &str) -> StoreResult<CorruptionOutcome> {
        let paths = self.records.paths();
        let user_dir = paths.user_dir(id);
        let timestamp = chrono::Utc::now().format(DATE_FORMAT).to_string();

        warn!("Record for user {id} is corrupted: {reason}");
        self.quarantine_record(id, &timestamp)?;

        if let Some(report) = self.restore_from_backup(id)? {
            return Ok(CorruptionOutcome::Restored(report));
        }

        let has_entries = user_dir.is_dir() && !read_dir_sorted(&user_dir)?.is_empty();

        if !has_entries {
            if user_dir.exists() {
                fs::remove_dir(&user_dir).map_err(|e| StoreError::directory(user_dir.clone(), e))?;
            }
            // The backup, if any, failed to restore above.
            if let Err(e) = self.backups.remove(id) {
                warn!("Failed to remove backup for removed user {id}: {e}");
            }
            audit_event::emit(
                self.notifier,
                AuditEvent::CorruptionDetected {
                    user_id: id.to_string(),
                    reason: reason.to_string(),
                    user_dir: user_dir.display().to_string(),
                    remaining: Vec::new(),
                    directory_removed: true,
                },
            );
            audit_event::emit(
                self.notifier,
                AuditEvent::UserRemoved {
                    user_id: id.to_string(),
                    reason: reason.to_string(),
                },
            );
            return Ok(CorruptionOutcome::DirectoryRemoved { user_dir });
        }

        let remaining = list_remaining(&user_dir)?;

        let archive = if self.options.archive_remaining {
            let archive_path = paths
                .quarantine_dir_for(id)
                .join(format!("remaining.{timestamp}.zip"));
            archive_directory(&user_dir, &archive_path)?;
            Some(archive_path)
        } else {
            None
        };

        let report = CorruptionReport {
            user_id: id.to_string(),
            user_dir: user_dir.clone(),
            remaining_files: remaining,
            reason: reason.to_string(),
            archive,
        };

        audit_event::emit(
            self.notifier,
            AuditEvent::CorruptionDetected {
                user_id: id.to_string(),
                reason: reason.to_string(),
                user_dir: user_dir.display().to_string(),
                remaining: report.remaining_files.clone(),
                directory_removed: false,
            },
        );
        self.notifier.notify(report.title(), &report.message());

        Ok(CorruptionOutcome::Reported(report))
    }

    /// Moves the record out of the user directory, keeping a copy if configured.
    fn quarantine_record(&self, id: &UserId, timestamp: &str) -> StoreResult<()> {
        let paths = self.records.paths();
        let record_path = paths.record_path(id);
        if !record_path.exists() {
            return Ok(());
        }

        if !self.options.keep_corrupted_copy {
            return self.records.delete(id).map(|_| ());
        }

        let quarantine_dir = paths.quarantine_dir_for(id);
        fs::create_dir_all(&quarantine_dir)
            .map_err(|e| StoreError::quarantine(quarantine_dir.clone(), e))?;

        let target = quarantine_dir.join(format!(
            "{}.corrupted.{timestamp}",
            paths.record_filename()
        ));
        fs::rename(&record_path, &target).map_err(|e| StoreError::quarantine(target.clone(), e))?;

        warn!("Quarantined corrupted record to {target:?}");
        Ok(())
    }

    fn restore_from_backup(&self, id: &UserId) -> StoreResult<Option<MigrationReport>> {
        if !self.options.backup_enabled {
            return Ok(None);
        }

        let Some(text) = self.backups.load_raw(id)? else {
            debug!("No backup for user {id}");
            return Ok(None);
        };

        let report = match MigrationEngine::new(self.catalog).migrate(&text) {
            MigrationOutcome::Migrated(report) => report,
            MigrationOutcome::Invalid(reason) => {
                warn!("Backup for user {id} is unusable: {reason}");
                return Ok(None);
            }
        };

        let user_dir = self.records.paths().user_dir(id);
        fs::create_dir_all(&user_dir).map_err(|e| StoreError::directory(user_dir, e))?;
        let saved = self.records.save(id, &report.record)?;
        if saved != text {
            self.backups.save(id, &saved)?;
        }

        audit_event::emit(
            self.notifier,
            AuditEvent::MigrationRestored {
                user_id: id.to_string(),
                backup: self.records.paths().backup_path(id).display().to_string(),
            },
        );
        Ok(Some(report))
    }
}

/// Entries left in a user directory, one level deep: files directly inside
/// it, and the children of each immediate subdirectory. Nested directories
/// are listed with a trailing `/`, and so is an empty subdirectory itself.
pub(crate) fn list_remaining(user_dir: &Path) -> StoreResult<Vec<String>> {
    let mut remaining = Vec::new();

    for entry in read_dir_sorted(user_dir)? {
        let name = entry_name(&entry);
        if entry.is_dir() {
            let children = read_dir_sorted(&entry)?;
            if children.is_empty() {
                remaining.push(format!("{name}/"));
            }
            for child in children {
                let suffix = if child.is_dir() { "/" } else { "" };
                remaining.push(format!("{name}/{}{suffix}", entry_name(&child)));
            }
        } else {
            remaining.push(name);
        }
    }

    Ok(remaining)
}

fn read_dir_sorted(dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::directory(dir.to_path_buf(), e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::directory(dir.to_path_buf(), e))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Zips everything under `source` into `archive_path`.
fn archive_directory(source: &Path, archive_path: &Path) -> StoreResult<()> {
    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::quarantine(parent.to_path_buf(), e))?;
    }

    let file = fs::File::create(archive_path)
        .map_err(|e| StoreError::quarantine(archive_path.to_path_buf(), e))?;
    let mut zip = zip::ZipWriter::new(file);

    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    let mut pending = vec![source.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for path in read_dir_sorted(&dir)? {
            let relative = path
                .strip_prefix(source)
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_else(|_| entry_name(&path));

            if path.is_dir() {
                zip.add_directory(relative.as_str(), options)
                    .map_err(|e| StoreError::archive(archive_path.to_path_buf(), e.to_string()))?;
                pending.push(path);
                continue;
            }

            zip.start_file(relative.as_str(), options)
                .map_err(|e| StoreError::archive(archive_path.to_path_buf(), e.to_string()))?;
            let mut input = match fs::File::open(&path) {
                Ok(input) => input,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::quarantine(path, e)),
            };
            std::io::copy(&mut input, &mut zip)
                .map_err(|e| StoreError::quarantine(archive_path.to_path_buf(), e))?;
        }
    }

    zip.finish()
        .map_err(|e| StoreError::archive(archive_path.to_path_buf(), e.to_string()))?;
    Ok(())
}
