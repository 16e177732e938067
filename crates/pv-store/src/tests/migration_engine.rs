use crate::tests::full_record;
use crate::{InvalidReason, MigrationEngine, MigrationOutcome};

use pv_core::{Catalog, Preference};

fn migrate(raw: &str) -> MigrationOutcome {
    MigrationEngine::new(Catalog::standard()).migrate(raw)
}

fn migrated(raw: &str) -> crate::MigrationReport {
    match migrate(raw) {
        MigrationOutcome::Migrated(report) => report,
        MigrationOutcome::Invalid(reason) => panic!("expected migration, got {reason}"),
    }
}

#[test]
fn given_full_canonical_record_when_migrate_then_unchanged() {
    // Given
    let text = full_record("Alice", "hash").to_canonical().unwrap();

    // When
    let report = migrated(&text);

    // Then
    assert!(!report.changed());
    assert_eq!(report.record.to_canonical().unwrap(), text);
}

#[test]
fn given_minimal_record_when_migrate_then_all_catalog_fields_injected_in_order() {
    // When
    let report = migrated(r#"{"name":"Alice","password":"hash"}"#);

    // Then
    let expected: Vec<&str> = Catalog::standard().all_field_ids().skip(2).collect();
    assert_eq!(report.injected, expected);
    assert!(report.repaired.is_empty());
    let ids: Vec<&str> = report.record.field_ids().collect();
    let all: Vec<&str> = Catalog::standard().all_field_ids().collect();
    assert_eq!(ids, all);
}

#[test]
fn given_null_like_values_when_migrate_then_defaults_restored_and_reported() {
    // Given
    let mut record = full_record("Alice", "hash");
    record.insert("font", "null");
    record.insert("fullscreen", "   ");

    // When
    let report = migrated(&record.to_canonical().unwrap());

    // Then
    assert_eq!(report.repaired, vec!["font", "fullscreen"]);
    assert!(report.injected.is_empty());
    assert_eq!(report.record.get_str("font"), Some("Agency FB"));
    assert_eq!(report.record.get_str("fullscreen"), Some("0"));
}

#[test]
fn given_json_null_and_numbers_when_migrate_then_normalized_to_strings() {
    // Given
    let mut text = full_record("Alice", "hash").to_canonical().unwrap();
    text = text.replace(r#""fontsize":"30""#, r#""fontsize":24"#);
    text = text.replace(r#""darkmode":"0""#, r#""darkmode":true"#);
    text = text.replace(r#""windowcolor":"1A2033""#, r#""windowcolor":null"#);

    // When
    let report = migrated(&text);

    // Then
    assert_eq!(report.record.get_str("fontsize"), Some("24"));
    assert_eq!(report.record.get_str("darkmode"), Some("1"));
    assert_eq!(report.record.get_str("windowcolor"), Some("1A2033"));
    assert_eq!(report.repaired.len(), 3);
}

#[test]
fn given_out_of_range_number_in_toggle_when_migrate_then_default_restored() {
    // Given
    let text = full_record("Alice", "hash")
        .to_canonical()
        .unwrap()
        .replace(r#""fullscreen":"0""#, r#""fullscreen":5"#);

    // When
    let report = migrated(&text);

    // Then
    assert_eq!(report.record.get_str("fullscreen"), Some("0"));
    assert_eq!(report.repaired, vec!["fullscreen"]);
}

#[test]
fn given_numeric_one_in_toggle_when_migrate_then_kept_as_toggle_string() {
    // Given
    let text = full_record("Alice", "hash")
        .to_canonical()
        .unwrap()
        .replace(r#""fullscreen":"0""#, r#""fullscreen":1"#);

    // When
    let report = migrated(&text);

    // Then
    assert_eq!(report.record.get_str("fullscreen"), Some("1"));
}

#[test]
fn given_blank_password_when_invalid_identity_field_then_password_named() {
    // Given
    let mut record = full_record("Alice", "hash");
    record.insert("password", " ");

    // When
    let field = MigrationEngine::new(Catalog::standard()).invalid_identity_field(&record);

    // Then
    assert_eq!(field, Some("password"));
}

#[test]
fn given_null_name_when_migrate_then_invalid_even_if_other_fields_broken() {
    // Given
    let mut record = full_record("null", "hash");
    record.insert("font", "");

    // When
    let outcome = migrate(&record.to_canonical().unwrap());

    // Then
    assert_eq!(
        outcome,
        MigrationOutcome::Invalid(InvalidReason::FatalField {
            field_id: String::from("name")
        })
    );
}

#[test]
fn given_missing_password_key_when_migrate_then_invalid() {
    // When
    let outcome = migrate(r#"{"name":"Alice","font":"Agency FB"}"#);

    // Then
    assert_eq!(
        outcome,
        MigrationOutcome::Invalid(InvalidReason::FatalField {
            field_id: String::from("password")
        })
    );
}

#[test]
fn given_empty_or_garbage_text_when_migrate_then_invalid() {
    assert_eq!(migrate(""), MigrationOutcome::Invalid(InvalidReason::Empty));
    assert_eq!(migrate(" null "), MigrationOutcome::Invalid(InvalidReason::Empty));
    assert!(matches!(
        migrate("{\"name\":"),
        MigrationOutcome::Invalid(InvalidReason::Unparsable { .. })
    ));
    assert!(matches!(
        migrate("[1,2,3]"),
        MigrationOutcome::Invalid(InvalidReason::Unparsable { .. })
    ));
}

#[test]
fn given_legacy_fields_when_migrate_then_preserved_in_place() {
    // Given
    let text = r#"{"name":"Alice","oldFlag":"1","password":"hash","legacyList":[1,2]}"#;

    // When
    let report = migrated(text);

    // Then
    let canonical = report.record.to_canonical().unwrap();
    assert!(canonical.starts_with(
        r#"{"name":"Alice","oldFlag":"1","password":"hash","legacyList":[1,2],"font":"Agency FB""#
    ));
}

#[test]
fn given_extended_catalog_when_migrate_then_new_pref_appended_before_closing_brace() {
    // Given
    let catalog = Catalog::standard()
        .with_entry(Preference::toggle("newPref", "0", "New Pref", "Added later"))
        .unwrap();
    let original = full_record("Alice", "hash").to_canonical().unwrap();

    // When
    let outcome = MigrationEngine::new(&catalog).migrate(&original);

    // Then
    let MigrationOutcome::Migrated(report) = outcome else {
        panic!("expected migration");
    };
    assert_eq!(report.injected, vec!["newPref"]);
    let canonical = report.record.to_canonical().unwrap();
    let prefix = &original[..original.len() - 1];
    assert_eq!(canonical, format!(r#"{prefix},"newPref":"0"}}"#));
}
