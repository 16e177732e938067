use pv_core::{Catalog, NAME_FIELD, PASSWORD_FIELD, Record, UserId};
use pv_store::{AuditEvent, Notifier, ProfileStore, StoreOptions, StorePaths};

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

/// Notifier that remembers everything it was told.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(String, String)>>,
    pub events: Mutex<Vec<AuditEvent>>,
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
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }

    pub fn notice_count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }
}

/// A profile store in a temp directory, with a recording notifier.
pub struct TestStore {
    pub temp: TempDir,
    pub paths: StorePaths,
    pub notifier: Arc<RecordingNotifier>,
    pub store: ProfileStore,
}

pub fn create_test_store() -> TestStore {
    create_test_store_with(Catalog::standard().clone(), StoreOptions::default())
}

pub fn create_test_store_with(catalog: Catalog, options: StoreOptions) -> TestStore {
    let temp = TempDir::new().unwrap();
    let paths = StorePaths::new(temp.path());
    let notifier = Arc::new(RecordingNotifier::default());
    let store = ProfileStore::builder(paths.clone())
        .catalog(catalog)
        .options(options)
        .notifier(notifier.clone())
        .build();

    TestStore {
        temp,
        paths,
        notifier,
        store,
    }
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

/// A record with every standard catalog field at its default.
pub fn full_record(name: &str, password: &str) -> Record {
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
pub fn write_user_file(paths: &StorePaths, id: &UserId, text: &str) {
    std::fs::create_dir_all(paths.user_dir(id)).unwrap();
    std::fs::write(paths.record_path(id), text).unwrap();
}

pub fn read_user_file(paths: &StorePaths, id: &UserId) -> String {
    std::fs::read_to_string(paths.record_path(id)).unwrap()
}
