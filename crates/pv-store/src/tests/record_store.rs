use crate::tests::{full_record, temp_paths, user, write_user_file};
use crate::{RecordStore, StoreError};

use googletest::assert_that;
use googletest::prelude::*;

#[test]
fn given_missing_file_when_load_then_not_found() {
    // Given
    let (_temp, paths) = temp_paths();
    let store = RecordStore::new(paths);

    // When
    let result = store.load(&user("alice"));

    // Then
    assert_that!(result, err(matches_pattern!(StoreError::NotFound { .. })));
}

#[test]
fn given_garbage_file_when_load_then_unparsable() {
    // Given
    let (_temp, paths) = temp_paths();
    let id = user("alice");
    write_user_file(&paths, &id, "{\"name\":\"Alice\",");
    let store = RecordStore::new(paths);

    // When
    let result = store.load(&id);

    // Then
    assert_that!(result, err(matches_pattern!(StoreError::Unparsable { .. })));
}

#[test]
fn given_record_when_saved_then_file_is_single_canonical_line() {
    // Given
    let (_temp, paths) = temp_paths();
    let id = user("alice");
    std::fs::create_dir_all(paths.user_dir(&id)).unwrap();
    let store = RecordStore::new(paths.clone());
    let record = full_record("Alice", "hash");

    // When
    let written = store.save(&id, &record).unwrap();

    // Then
    let on_disk = std::fs::read_to_string(paths.record_path(&id)).unwrap();
    assert_eq!(on_disk, written);
    assert!(!on_disk.contains('\n'));
    assert!(on_disk.starts_with("{\"name\":\"Alice\",\"password\":\"hash\""));
    assert_eq!(on_disk.matches('}').count(), 1);
    assert_eq!(store.load(&id).unwrap(), record);
}

#[test]
fn given_save_when_done_then_no_temp_files_left() {
    // Given
    let (_temp, paths) = temp_paths();
    let id = user("alice");
    std::fs::create_dir_all(paths.user_dir(&id)).unwrap();
    let store = RecordStore::new(paths.clone());

    // When
    store.save(&id, &full_record("Alice", "hash")).unwrap();
    store.save(&id, &full_record("Alice", "hash2")).unwrap();

    // Then
    let names: Vec<String> = std::fs::read_dir(paths.user_dir(&id))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![String::from("userdata.json")]);
}

#[test]
fn given_missing_user_dir_when_save_then_write_failure() {
    // Given
    let (_temp, paths) = temp_paths();
    let store = RecordStore::new(paths);

    // When
    let result = store.save(&user("ghost"), &full_record("Ghost", "x"));

    // Then
    assert_that!(result, err(matches_pattern!(StoreError::WriteFailure { .. })));
}

#[test]
fn test_delete_reports_whether_file_existed() {
    let (_temp, paths) = temp_paths();
    let id = user("alice");
    write_user_file(&paths, &id, "{}");
    let store = RecordStore::new(paths);

    assert!(store.exists(&id));
    assert!(store.delete(&id).unwrap());
    assert!(!store.exists(&id));
    assert!(!store.delete(&id).unwrap());
}
