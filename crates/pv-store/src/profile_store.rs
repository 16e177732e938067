//! The store callers use: every operation goes through the shared gate, and
//! every load migrates the record against the catalog before handing it out.

use crate::audit_event::{self, AuditEvent};
use crate::{
    BackupStore, ConcurrencyGate, CorruptionHandler, CorruptionOutcome, GateGuard, IdGenerator,
    InvalidReason, LogNotifier, MigrationEngine, MigrationOutcome, MigrationReport,
    MigrationStatus, Notifier, RecordStore, StoreError, StoreOptions, StorePaths, StoreResult,
    UserDirectory, UserMigration, UuidGenerator,
};

use pv_core::{
    Catalog, FieldAccessor, LOGGED_IN_FIELD, NAME_FIELD, PASSWORD_FIELD, Record, TOGGLE_OFF,
    TOGGLE_ON, UserId,
};

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};

/// A record handed out by a gated load.
struct Loaded {
    report: MigrationReport,
    restored: bool,
}

/// Thread-safe handle to a profile store. Clones share the gate and the
/// quarantine list.
#[derive(Clone)]
pub struct ProfileStore {
    paths: StorePaths,
    records: RecordStore,
    backups: BackupStore,
    users: UserDirectory,
    catalog: Arc<Catalog>,
    options: StoreOptions,
    notifier: Arc<dyn Notifier>,
    id_generator: Arc<dyn IdGenerator>,
    gate: Arc<ConcurrencyGate>,
    invalid: Arc<Mutex<HashSet<UserId>>>,
}

impl ProfileStore {
    pub fn builder(paths: StorePaths) -> ProfileStoreBuilder {
        ProfileStoreBuilder::new(paths)
    }

    /// Store with the standard catalog and default options.
    pub fn open(paths: StorePaths) -> Self {
        Self::builder(paths).build()
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn gate(&self) -> &Arc<ConcurrencyGate> {
        &self.gate
    }

    pub fn accessor(&self) -> FieldAccessor<'_> {
        FieldAccessor::new(&self.catalog, self.options.lookup)
    }

    /// Loads a user's record, migrating and persisting it if needed.
    ///
    /// An unrecoverable record is quarantined and reported, and the call
    /// fails with [`StoreError::Corrupted`].
    pub fn load(&self, id: &UserId) -> StoreResult<Record> {
        let guard = self.acquire()?;
        Ok(self.load_locked(&guard, id)?.report.record)
    }

    /// Reads one field. Names are matched against the catalog first, so an
    /// unknown name fails with `UnknownField` rather than reading as absent.
    pub fn get_field(&self, id: &UserId, name: &str) -> StoreResult<Option<String>> {
        let accessor = self.accessor();
        let preference = accessor.resolve(name)?;

        let guard = self.acquire()?;
        let loaded = self.load_locked(&guard, id)?;
        Ok(accessor
            .get_field(&loaded.report.record, &preference.id)
            .map(String::from))
    }

    /// Read-modify-write of one field under a single hold of the gate.
    pub fn set_field(&self, id: &UserId, name: &str, value: &str) -> StoreResult<()> {
        let accessor = self.accessor();
        let preference = accessor.resolve(name)?;
        preference.kind.check_value(&preference.id, value)?;

        let guard = self.acquire()?;
        let mut record = self.load_locked(&guard, id)?.report.record;
        accessor.set_field(&mut record, &preference.id, value)?;
        self.save_locked(&guard, id, &record)
    }

    /// Replaces a user's whole record. The user must already exist, and the
    /// record must carry every identity field, so the backup only ever holds
    /// a record that loads.
    pub fn save(&self, id: &UserId, record: &Record) -> StoreResult<()> {
        if let Some(field) = MigrationEngine::new(&self.catalog).invalid_identity_field(record) {
            return Err(StoreError::fatal_field(id.as_str(), field));
        }

        let guard = self.acquire()?;
        if !self.users.exists(id) {
            return Err(StoreError::not_found(id.as_str(), self.paths.user_dir(id)));
        }
        self.save_locked(&guard, id, record)
    }

    /// Creates a user with catalog defaults and the given identity fields.
    ///
    /// `password` is stored as given; hashing is the caller's concern.
    pub fn create_user(&self, name: &str, password: &str) -> StoreResult<UserId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("name cannot be empty"));
        }
        if password.trim().is_empty() {
            return Err(StoreError::validation("password cannot be empty"));
        }

        let guard = self.acquire()?;

        if self.name_in_use(&guard, name)? {
            return Err(StoreError::validation(format!(
                "name {name:?} is already in use"
            )));
        }

        let id = self.users.allocate(self.id_generator.as_ref())?;

        let mut record = Record::new();
        for preference in self.catalog.entries() {
            let value = match preference.id.as_str() {
                NAME_FIELD => name,
                PASSWORD_FIELD => password,
                _ => preference.default_value.as_str(),
            };
            record.insert(preference.id.clone(), value);
        }

        if let Err(e) = self.save_locked(&guard, &id, &record) {
            if let Err(cleanup) = self.users.remove(&id) {
                warn!("Failed to remove partially created user {id}: {cleanup}");
            }
            return Err(e);
        }

        audit_event::emit(
            self.notifier.as_ref(),
            AuditEvent::UserCreated {
                user_id: id.to_string(),
            },
        );
        info!("Created user {id}");
        Ok(id)
    }

    /// Users with a record file, minus those quarantined by this process.
    pub fn list_users(&self) -> StoreResult<Vec<UserId>> {
        let _guard = self.acquire()?;
        self.list_users_locked()
    }

    /// Loads every user once, migrating as needed. The gate is released
    /// between users.
    pub fn migrate_all(&self) -> StoreResult<Vec<UserMigration>> {
        let mut summary = Vec::new();

        for id in self.list_users()? {
            summary.push(self.migrate_user(&id)?);
        }

        Ok(summary)
    }

    /// Loads one user, migrating as needed, and reports what happened.
    /// Only gate failures are returned as errors.
    pub fn migrate_user(&self, id: &UserId) -> StoreResult<UserMigration> {
        let result = {
            let guard = self.acquire()?;
            self.load_locked(&guard, id)
        };

        let line = match result {
            Ok(loaded) => UserMigration {
                user_id: id.to_string(),
                status: if loaded.restored {
                    MigrationStatus::Restored
                } else if loaded.report.changed() {
                    MigrationStatus::Migrated
                } else {
                    MigrationStatus::Unchanged
                },
                repaired: loaded.report.repaired,
                injected: loaded.report.injected,
                error: None,
            },
            Err(e @ StoreError::Gate { .. }) => return Err(e),
            Err(e) => UserMigration {
                user_id: id.to_string(),
                status: if matches!(e, StoreError::Corrupted { .. }) {
                    MigrationStatus::Quarantined
                } else {
                    MigrationStatus::Failed
                },
                repaired: Vec::new(),
                injected: Vec::new(),
                error: Some(e.to_string()),
            },
        };

        Ok(line)
    }

    /// Startup sweep of abandoned user directories.
    pub fn cleanup_on_startup(&self) -> StoreResult<Vec<PathBuf>> {
        let _guard = self.acquire()?;
        let removed = self.users.cleanup_on_startup(
            &self.options.placeholder_marker,
            self.options.min_entries,
        )?;

        for dir in &removed {
            let user_id = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            audit_event::emit(
                self.notifier.as_ref(),
                AuditEvent::UserRemoved {
                    user_id,
                    reason: String::from("startup cleanup"),
                },
            );
        }

        Ok(removed)
    }

    /// Sets `loggedin` to off for every user. Returns how many records changed.
    pub fn logout_all(&self) -> StoreResult<usize> {
        let mut changed = 0;

        for id in self.list_users()? {
            let guard = self.acquire()?;
            let mut record = match self.load_locked(&guard, &id) {
                Ok(loaded) => loaded.report.record,
                Err(e @ StoreError::Gate { .. }) => return Err(e),
                Err(e) => {
                    warn!("Skipping logout for user {id}: {e}");
                    continue;
                }
            };

            if record.get_str(LOGGED_IN_FIELD) != Some(TOGGLE_OFF) {
                record.insert(LOGGED_IN_FIELD, TOGGLE_OFF);
                self.save_locked(&guard, &id, &record)?;
                changed += 1;
            }
        }

        Ok(changed)
    }

    /// The first user, in listing order, whose `loggedin` is on.
    pub fn first_logged_in(&self) -> StoreResult<Option<UserId>> {
        for id in self.list_users()? {
            let guard = self.acquire()?;
            match self.load_locked(&guard, &id) {
                Ok(loaded) if loaded.report.record.get_str(LOGGED_IN_FIELD) == Some(TOGGLE_ON) => {
                    return Ok(Some(id));
                }
                Ok(_) => {}
                Err(e @ StoreError::Gate { .. }) => return Err(e),
                Err(e) => debug!("Skipping user {id}: {e}"),
            }
        }
        Ok(None)
    }

    /// Names (lowercased) used by more than one user, with the users sharing them.
    pub fn find_duplicate_names(&self) -> StoreResult<BTreeMap<String, Vec<UserId>>> {
        let guard = self.acquire()?;
        let mut by_name: BTreeMap<String, Vec<UserId>> = BTreeMap::new();

        for (id, name) in self.stored_names(&guard)? {
            by_name.entry(name.to_lowercase()).or_default().push(id);
        }

        by_name.retain(|_, ids| ids.len() > 1);
        Ok(by_name)
    }

    /// Waits for the in-flight operation, then refuses all further ones.
    pub fn shutdown(&self) {
        info!("Shutting down profile store");
        self.gate.close_permanently();
    }

    /// Whether this process quarantined the user.
    pub fn is_quarantined(&self, id: &UserId) -> bool {
        self.invalid_set().contains(id)
    }

    fn acquire(&self) -> StoreResult<GateGuard<'_>> {
        Ok(self.gate.acquire_within(self.options.acquire_timeout)?)
    }

    fn load_locked(&self, guard: &GateGuard<'_>, id: &UserId) -> StoreResult<Loaded> {
        let user_dir = self.paths.user_dir(id);
        if self.is_quarantined(id) || !user_dir.is_dir() {
            return Err(StoreError::not_found(id.as_str(), user_dir));
        }

        let raw = match self.records.load_raw(id) {
            Ok(raw) => raw,
            Err(e @ (StoreError::NotFound { .. } | StoreError::Unreadable { .. })) => {
                return self.recover(guard, id, e);
            }
            Err(e) => return Err(e),
        };

        let report = match MigrationEngine::new(&self.catalog).migrate(&raw) {
            MigrationOutcome::Migrated(report) => report,
            MigrationOutcome::Invalid(reason) => {
                let record_path = self.paths.record_path(id);
                let cause = match reason {
                    InvalidReason::FatalField { field_id } => {
                        StoreError::fatal_field(id.as_str(), field_id)
                    }
                    other => StoreError::unparsable(record_path, other.to_string()),
                };
                return self.recover(guard, id, cause);
            }
        };

        let canonical = report.record.to_canonical()?;
        if canonical != raw {
            self.records.save_raw(id, &canonical)?;
            self.write_backup(id, &canonical);
            self.emit_migration_events(id, &report);
        } else if self.options.backup_enabled && self.backups.load_raw(id)?.is_none() {
            self.write_backup(id, &canonical);
        }

        Ok(Loaded {
            report,
            restored: false,
        })
    }

    fn save_locked(&self, _guard: &GateGuard<'_>, id: &UserId, record: &Record) -> StoreResult<()> {
        let text = self.records.save(id, record)?;
        self.write_backup(id, &text);
        Ok(())
    }

    /// Hands a broken record to the corruption handler.
    fn recover(&self, _guard: &GateGuard<'_>, id: &UserId, cause: StoreError) -> StoreResult<Loaded> {
        let handler = CorruptionHandler::new(
            &self.records,
            &self.backups,
            &self.catalog,
            &self.options,
            self.notifier.as_ref(),
        );

        let report = match handler.handle(id, &cause.corruption_reason())? {
            CorruptionOutcome::Restored(report) => {
                info!("Restored user {id} from backup");
                return Ok(Loaded {
                    report,
                    restored: true,
                });
            }
            CorruptionOutcome::DirectoryRemoved { .. } => None,
            CorruptionOutcome::Reported(report) => Some(report),
        };

        self.invalid_set().insert(id.clone());
        Err(StoreError::corrupted(id.as_str(), cause, report))
    }

    fn write_backup(&self, id: &UserId, text: &str) {
        if !self.options.backup_enabled {
            return;
        }
        if let Err(e) = self.backups.save(id, text) {
            warn!("Failed to back up record for user {id}: {e}");
        }
    }

    fn emit_migration_events(&self, id: &UserId, report: &MigrationReport) {
        if !report.repaired.is_empty() {
            audit_event::emit(
                self.notifier.as_ref(),
                AuditEvent::MigrationRepaired {
                    user_id: id.to_string(),
                    fields: report.repaired.clone(),
                },
            );
        }
        if !report.injected.is_empty() {
            audit_event::emit(
                self.notifier.as_ref(),
                AuditEvent::MigrationInjected {
                    user_id: id.to_string(),
                    fields: report.injected.clone(),
                },
            );
        }
    }

    fn list_users_locked(&self) -> StoreResult<Vec<UserId>> {
        let invalid = self.invalid_set();
        Ok(self
            .users
            .list_users()?
            .into_iter()
            .filter(|id| !invalid.contains(id))
            .collect())
    }

    /// Stored names read without migrating, so a lookup never quarantines anyone.
    fn stored_names(&self, _guard: &GateGuard<'_>) -> StoreResult<Vec<(UserId, String)>> {
        let mut names = Vec::new();
        for id in self.list_users_locked()? {
            match self.records.load(&id) {
                Ok(record) => {
                    if let Some(name) = record.get_str(NAME_FIELD) {
                        names.push((id, name.to_string()));
                    }
                }
                Err(e) => debug!("Ignoring unreadable record for user {id}: {e}"),
            }
        }
        Ok(names)
    }

    fn name_in_use(&self, guard: &GateGuard<'_>, name: &str) -> StoreResult<bool> {
        Ok(self
            .stored_names(guard)?
            .iter()
            .any(|(_, stored)| stored.trim().eq_ignore_ascii_case(name)))
    }

    fn invalid_set(&self) -> std::sync::MutexGuard<'_, HashSet<UserId>> {
        self.invalid.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct ProfileStoreBuilder {
    paths: StorePaths,
    catalog: Option<Catalog>,
    options: StoreOptions,
    notifier: Arc<dyn Notifier>,
    id_generator: Arc<dyn IdGenerator>,
    gate: Option<Arc<ConcurrencyGate>>,
}

impl ProfileStoreBuilder {
    fn new(paths: StorePaths) -> Self {
        Self {
            paths,
            catalog: None,
            options: StoreOptions::default(),
            notifier: Arc::new(LogNotifier),
            id_generator: Arc::new(UuidGenerator),
            gate: None,
        }
    }

    /// Defaults to [`Catalog::standard`].
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Share a gate with other stores. Without this the store gets its own.
    pub fn gate(mut self, gate: Arc<ConcurrencyGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn build(self) -> ProfileStore {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Catalog::standard().clone());

        ProfileStore {
            records: RecordStore::new(self.paths.clone()),
            backups: BackupStore::new(self.paths.clone()),
            users: UserDirectory::new(self.paths.clone()),
            paths: self.paths,
            catalog: Arc::new(catalog),
            options: self.options,
            notifier: self.notifier,
            id_generator: self.id_generator,
            gate: self.gate.unwrap_or_default(),
            invalid: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}
