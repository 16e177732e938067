//! File-backed profile store: one JSON record per user, serialized through a
//! single process-wide gate, migrated against the preference catalog on load.

mod audit_event;
mod backup_store;
mod concurrency_gate;
mod corruption_handler;
mod corruption_report;
mod error;
mod id_generator;
mod migration_engine;
mod migration_outcome;
mod notifier;
mod profile_store;
mod record_store;
mod store_options;
mod store_paths;
mod user_directory;
mod user_migration;

#[cfg(test)]
mod tests;

pub use audit_event::{AUDIT_TARGET, AuditEvent};
pub use backup_store::BackupStore;
pub use concurrency_gate::{ConcurrencyGate, GateError, GateGuard, GateResult, GateState};
pub use corruption_handler::{CorruptionHandler, CorruptionOutcome};
pub use corruption_report::CorruptionReport;
pub use error::{Result as StoreResult, StoreError};
pub use id_generator::{IdGenerator, UuidGenerator};
pub use migration_engine::MigrationEngine;
pub use migration_outcome::{InvalidReason, MigrationOutcome, MigrationReport};
pub use notifier::{LogNotifier, Notifier};
pub use profile_store::{ProfileStore, ProfileStoreBuilder};
pub use record_store::RecordStore;
pub use store_options::StoreOptions;
pub use store_paths::StorePaths;
pub use user_directory::UserDirectory;
pub use user_migration::{MigrationStatus, UserMigration};

/// Asset subdirectories created next to every new user's record.
pub const USER_ASSET_DIRS: [&str; 2] = ["Backgrounds", "Music"];

/// Collisions tolerated from the identifier generator before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";
