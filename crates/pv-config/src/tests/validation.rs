use crate::tests::{EnvGuard, setup_config_dir};
use crate::{Config, MAX_ACQUIRE_TIMEOUT_MS};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok};
use serial_test::serial;

fn validate_error_message() -> String {
    let config = Config::load().unwrap();
    let result = config.validate();
    assert_that!(result, err(anything()));
    format!("{}", result.unwrap_err())
}

#[test]
#[serial]
fn given_zero_min_entries_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _min = EnvGuard::set("PV_CLEANUP_MIN_ENTRIES", "0");

    // When
    let err_msg = validate_error_message();

    // Then
    assert_that!(err_msg, contains_substring("cleanup.min_entries"));
}

#[test]
#[serial]
fn given_non_json_record_filename_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _name = EnvGuard::set("PV_STORE_RECORD_FILENAME", "userdata.txt");

    // When
    let err_msg = validate_error_message();

    // Then
    assert_that!(err_msg, contains_substring(".json"));
}

#[test]
#[serial]
fn given_users_dir_with_traversal_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _dir = EnvGuard::set("PV_STORE_USERS_DIR", "../users");

    // When
    let err_msg = validate_error_message();

    // Then
    assert_that!(err_msg, contains_substring(".."));
}

#[test]
#[serial]
fn given_relative_root_with_traversal_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _root = EnvGuard::set("PV_STORE_ROOT", "../../etc");

    // When
    let err_msg = validate_error_message();

    // Then
    assert_that!(err_msg, contains_substring("store.root"));
}

#[test]
#[serial]
fn given_shared_backup_and_users_dir_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _dir = EnvGuard::set("PV_STORE_BACKUP_DIR", "users");

    // When
    let err_msg = validate_error_message();

    // Then
    assert_that!(err_msg, contains_substring("distinct"));
}

#[test]
#[serial]
fn given_gate_timeout_over_one_hour_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let too_long = (MAX_ACQUIRE_TIMEOUT_MS + 1).to_string();
    let _timeout = EnvGuard::set("PV_GATE_ACQUIRE_TIMEOUT_MS", &too_long);

    // When
    let err_msg = validate_error_message();

    // Then
    assert_that!(err_msg, contains_substring("gate.acquire_timeout_ms"));
}

#[test]
#[serial]
fn given_gate_timeout_at_one_hour_when_validate_then_ok() {
    // Given
    let _temp = setup_config_dir();
    let limit = MAX_ACQUIRE_TIMEOUT_MS.to_string();
    let _timeout = EnvGuard::set("PV_GATE_ACQUIRE_TIMEOUT_MS", &limit);

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_log_file_with_separator_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _file = EnvGuard::set("PV_LOG_FILE", "nested/pv.log");

    // When
    let err_msg = validate_error_message();

    // Then
    assert_that!(err_msg, contains_substring("logging.file"));
}
