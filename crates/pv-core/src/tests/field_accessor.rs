use crate::{Catalog, CoreError, FieldAccessor, FieldLookup, Record};

use googletest::assert_that;
use googletest::prelude::*;

fn sample_record() -> Record {
    Record::parse(r#"{"name":"Alice","password":"abc123","fullscreen":"0","font":"Agency FB"}"#)
        .unwrap()
}

#[test]
fn given_exact_lookup_when_get_field_then_value_returned() {
    // Given
    let accessor = FieldAccessor::exact(Catalog::standard());
    let record = sample_record();

    // When / Then
    assert_eq!(accessor.get_field(&record, "name"), Some("Alice"));
    assert_eq!(accessor.get_field(&record, "FullScreen"), Some("0"));
    assert_eq!(accessor.get_field(&record, "darkmode"), None);
}

#[test]
fn given_exact_lookup_when_shorthand_name_then_unknown_field() {
    // Given
    let accessor = FieldAccessor::exact(Catalog::standard());

    // When
    let result = accessor.resolve("pass");

    // Then
    assert_that!(result, err(anything()));
}

#[test]
fn given_lenient_lookup_when_shorthand_name_then_resolves_to_password() {
    // Given
    let accessor = FieldAccessor::new(Catalog::standard(), FieldLookup::Lenient);
    let record = sample_record();

    // When / Then
    assert_eq!(accessor.resolve("pass").unwrap().id, "password");
    assert_eq!(accessor.resolve("getPassword").unwrap().id, "password");
    assert_eq!(accessor.resolve("setFont").unwrap().id, "font");
    assert_eq!(accessor.get_field(&record, "pass"), Some("abc123"));
}

#[test]
fn given_lenient_lookup_when_exact_id_exists_then_exact_match_wins() {
    // Given
    let accessor = FieldAccessor::new(Catalog::standard(), FieldLookup::Lenient);

    // When
    let resolved = accessor.resolve("font").unwrap();

    // Then
    // "font" is also a substring of "fontsize"; the exact id wins.
    assert_eq!(resolved.id, "font");
}

#[test]
fn given_valid_value_when_set_field_then_record_updated_in_place() {
    // Given
    let accessor = FieldAccessor::exact(Catalog::standard());
    let mut record = sample_record();

    // When
    let result = accessor.set_field(&mut record, "fullscreen", "1");

    // Then
    assert_that!(result, ok(anything()));
    assert_eq!(record.get_str("fullscreen"), Some("1"));
    let ids: Vec<&str> = record.field_ids().collect();
    assert_eq!(ids, vec!["name", "password", "fullscreen", "font"]);
}

#[test]
fn given_unknown_name_when_set_field_then_record_unchanged() {
    // Given
    let accessor = FieldAccessor::exact(Catalog::standard());
    let mut record = sample_record();
    let before = record.clone();

    // When
    let result = accessor.set_field(&mut record, "totallyUnknownXyz", "v");

    // Then
    assert_that!(
        result,
        err(matches_pattern!(CoreError::UnknownField { .. }))
    );
    assert_eq!(record, before);
}

#[test]
fn given_non_binary_toggle_value_when_set_field_then_invalid_value() {
    // Given
    let accessor = FieldAccessor::exact(Catalog::standard());
    let mut record = sample_record();
    let before = record.clone();

    // When
    let result = accessor.set_field(&mut record, "fullscreen", "yes");

    // Then
    assert_that!(
        result,
        err(matches_pattern!(CoreError::InvalidValue { .. }))
    );
    assert_eq!(record, before);
}

#[test]
fn given_empty_identity_value_when_set_field_then_invalid_value() {
    // Given
    let accessor = FieldAccessor::exact(Catalog::standard());
    let mut record = sample_record();

    // When
    let result = accessor.set_field(&mut record, "name", "");

    // Then
    assert_that!(result, err(anything()));
    assert_eq!(record.get_str("name"), Some("Alice"));
}

#[test]
fn given_legacy_field_when_get_field_then_raw_value_readable() {
    // Given
    let accessor = FieldAccessor::exact(Catalog::standard());
    let record = Record::parse(r#"{"name":"Alice","oldFlag":"1"}"#).unwrap();

    // When / Then
    assert_eq!(accessor.get_field(&record, "oldFlag"), Some("1"));
}
