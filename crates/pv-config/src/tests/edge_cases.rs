use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, write_config};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err};
use serial_test::serial;

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "this is not valid toml {{{{");

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.toml"));
}

#[test]
#[serial]
fn given_wrong_type_in_toml_when_load_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [cleanup]
            min_entries = "two"
        "#,
    );

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_unparseable_env_number_when_load_then_value_unchanged() {
    // Given
    let _temp = setup_config_dir();
    let _timeout = EnvGuard::set("PV_GATE_ACQUIRE_TIMEOUT_MS", "soon");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.gate.acquire_timeout_ms, eq(crate::DEFAULT_ACQUIRE_TIMEOUT_MS));
}

#[test]
#[serial]
fn given_unknown_section_when_load_then_ignored() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [server]
            port = 9000
        "#,
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.store.root, eq(crate::DEFAULT_STORE_ROOT));
}

#[test]
#[serial]
fn given_bool_env_with_unexpected_text_when_load_then_false() {
    // Given
    let _temp = setup_config_dir();
    let _backup = EnvGuard::set("PV_BACKUP_ENABLED", "yes");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.backup.enabled, eq(false));
}
