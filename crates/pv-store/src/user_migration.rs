use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationStatus {
    /// Already matched the catalog.
    Unchanged,
    /// Repaired or injected fields were written back.
    Migrated,
    /// Replaced from the backup after the record was found corrupt.
    Restored,
    /// Unrecoverable; moved out of the user directory.
    Quarantined,
    /// Could not be processed, e.g. a write failure.
    Failed,
}

/// Per-user line of a bulk migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMigration {
    pub user_id: String,
    pub status: MigrationStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repaired: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub injected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
