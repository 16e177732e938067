use crate::{IdGenerator, MAX_ID_ATTEMPTS, StorePaths, StoreError, StoreResult, USER_ASSET_DIRS};

use pv_core::UserId;

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{debug, info, warn};

/// The per-user directories under the store's users root.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    paths: StorePaths,
}

impl UserDirectory {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// Ids of every user directory that holds a record file, sorted.
    pub fn list_users(&self) -> StoreResult<Vec<UserId>> {
        let mut users: Vec<UserId> = self
            .candidate_dirs()?
            .into_iter()
            .filter_map(|dir| {
                let name = dir.file_name()?.to_str()?.to_string();
                let id = UserId::new(name).ok()?;
                self.paths.record_path(&id).is_file().then_some(id)
            })
            .collect();

        users.sort();
        Ok(users)
    }

    /// Removes directories left behind by abandoned user creation: placeholders,
    /// directories without a record file and directories with fewer than
    /// `min_entries` entries. Returns the removed paths.
    pub fn cleanup_on_startup(
        &self,
        placeholder_marker: &str,
        min_entries: usize,
    ) -> StoreResult<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for dir in self.candidate_dirs()? {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let reason = if !placeholder_marker.is_empty() && name.contains(placeholder_marker) {
                Some("placeholder user")
            } else if !dir.join(self.paths.record_filename()).is_file() {
                Some("missing record file")
            } else if count_entries(&dir)? < min_entries {
                Some("too few entries")
            } else {
                None
            };

            let Some(reason) = reason else {
                continue;
            };

            match fs::remove_dir_all(&dir) {
                Ok(()) => {
                    info!("Removed user directory {dir:?} ({reason})");
                    removed.push(dir);
                }
                Err(e) => warn!("Failed to remove user directory {dir:?}: {e}"),
            }
        }

        Ok(removed)
    }

    /// Reserves a fresh user id and creates its directory with the asset subdirectories.
    pub fn allocate(&self, generator: &dyn IdGenerator) -> StoreResult<UserId> {
        let users_root = self.paths.users_root();
        fs::create_dir_all(&users_root).map_err(|e| StoreError::directory(users_root, e))?;

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = UserId::new(generator.generate())?;
            let user_dir = self.paths.user_dir(&id);

            match fs::create_dir(&user_dir) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("User id {id} already taken, retrying");
                    continue;
                }
                Err(e) => return Err(StoreError::directory(user_dir, e)),
            }

            for asset in USER_ASSET_DIRS {
                let asset_dir = user_dir.join(asset);
                fs::create_dir(&asset_dir).map_err(|e| StoreError::directory(asset_dir, e))?;
            }
            return Ok(id);
        }

        Err(StoreError::id_allocation(MAX_ID_ATTEMPTS))
    }

    pub fn remove(&self, id: &UserId) -> StoreResult<()> {
        let user_dir = self.paths.user_dir(id);
        match fs::remove_dir_all(&user_dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::directory(user_dir, e)),
        }
    }

    pub fn exists(&self, id: &UserId) -> bool {
        self.paths.user_dir(id).is_dir()
    }

    fn candidate_dirs(&self) -> StoreResult<Vec<PathBuf>> {
        let users_root = self.paths.users_root();
        let entries = match fs::read_dir(&users_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::directory(users_root, e)),
        };

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::directory(users_root.clone(), e))?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

fn count_entries(dir: &std::path::Path) -> StoreResult<usize> {
    fs::read_dir(dir)
        .map(|entries| entries.count())
        .map_err(|e| StoreError::directory(dir.to_path_buf(), e))
}
