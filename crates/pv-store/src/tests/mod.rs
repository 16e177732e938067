mod migration_engine;
mod record_store;

use crate::{AuditEvent, Notifier, StorePaths};

use pv_core::{Catalog, NAME_FIELD, PASSWORD_FIELD, Record, UserId};

use std::sync::Mutex;

use tempfile::TempDir;

/// Notifier that remembers everything it was told.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) notices: Mutex<Vec<(String, String)>>,
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }

    fn audit(&self, event: &AuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

impl RecordingNotifier {
    pub(crate) fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }
}

pub(crate) fn temp_paths() -> (TempDir, StorePaths) {
    let temp = TempDir::new().unwrap();
    let paths = StorePaths::new(temp.path());
    (temp, paths)
}

pub(crate) fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

/// A record with every standard catalog field at its default.
pub(crate) fn full_record(name: &str, password: &str) -> Record {
    let mut record = Record::new();
    for preference in Catalog::standard().entries() {
        let value = match preference.id.as_str() {
            NAME_FIELD => name,
            PASSWORD_FIELD => password,
            _ => preference.default_value.as_str(),
        };
        record.insert(preference.id.clone(), value);
    }
    record
}

/// Creates the user's directory and writes `text` as its record file.
pub(crate) fn write_user_file(paths: &StorePaths, id: &UserId, text: &str) {
    std::fs::create_dir_all(paths.user_dir(id)).unwrap();
    std::fs::write(paths.record_path(id), text).unwrap();
}
