use crate::Notifier;

use log::info;
use serde::Serialize;

/// Log target carrying one JSON object per audit event.
pub const AUDIT_TARGET: &str = "audit";

/// Structured record of a change the store made on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum AuditEvent {
    MigrationInjected {
        user_id: String,
        fields: Vec<String>,
    },
    MigrationRepaired {
        user_id: String,
        fields: Vec<String>,
    },
    MigrationRestored {
        user_id: String,
        backup: String,
    },
    CorruptionDetected {
        user_id: String,
        reason: String,
        user_dir: String,
        remaining: Vec<String>,
        directory_removed: bool,
    },
    UserCreated {
        user_id: String,
    },
    UserRemoved {
        user_id: String,
        reason: String,
    },
}

impl AuditEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MigrationInjected { .. } => "migration-injected",
            Self::MigrationRepaired { .. } => "migration-repaired",
            Self::MigrationRestored { .. } => "migration-restored",
            Self::CorruptionDetected { .. } => "corruption-detected",
            Self::UserCreated { .. } => "user-created",
            Self::UserRemoved { .. } => "user-removed",
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Self::MigrationInjected { user_id, .. }
            | Self::MigrationRepaired { user_id, .. }
            | Self::MigrationRestored { user_id, .. }
            | Self::CorruptionDetected { user_id, .. }
            | Self::UserCreated { user_id }
            | Self::UserRemoved { user_id, .. } => user_id,
        }
    }

    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"event":"{}","user_id":{:?},"error":{:?}}}"#,
                self.name(),
                self.user_id(),
                e.to_string()
            )
        })
    }
}

/// Writes the event to the audit log target and forwards it to the notifier.
pub(crate) fn emit(notifier: &dyn Notifier, event: AuditEvent) {
    info!(target: AUDIT_TARGET, "{}", event.to_json_line());
    notifier.audit(&event);
}
