//! Brings a stored record up to date with the preference catalog.
//!
//! The merge is append-only: fields already in the record keep their position
//! and unknown legacy fields are carried through untouched. Missing catalog
//! fields are added after everything else, in catalog order, so the
//! serialized form gains `"id":"default"` pairs just before the closing brace.

use crate::{InvalidReason, MigrationOutcome, MigrationReport};

use pv_core::{Catalog, CoreError, Record, TOGGLE_OFF, TOGGLE_ON, is_null_like};

use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct MigrationEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> MigrationEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Parses and migrates raw record text.
    pub fn migrate(&self, raw: &str) -> MigrationOutcome {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            return MigrationOutcome::Invalid(InvalidReason::Empty);
        }

        match Record::parse(trimmed) {
            Ok(record) => self.migrate_record(record),
            Err(CoreError::Unparsable { message, .. }) => {
                MigrationOutcome::Invalid(InvalidReason::Unparsable { message })
            }
            Err(other) => MigrationOutcome::Invalid(InvalidReason::Unparsable {
                message: other.to_string(),
            }),
        }
    }

    pub fn migrate_record(&self, mut record: Record) -> MigrationOutcome {
        let catalog = self.catalog;

        // Identity checks come first so a corrupt record is never half repaired.
        if let Some(field_id) = self.invalid_identity_field(&record) {
            return MigrationOutcome::Invalid(InvalidReason::FatalField {
                field_id: field_id.to_string(),
            });
        }

        let mut repaired = Vec::new();
        let mut injected = Vec::new();

        for preference in catalog.entries() {
            let stored = record.get(&preference.id);

            let replacement = match stored {
                None => {
                    injected.push(preference.id.clone());
                    preference.default_value.clone()
                }
                Some(Value::String(_)) if !is_null_like(stored) => continue,
                Some(value) => {
                    repaired.push(preference.id.clone());
                    let coerced = match value {
                        Value::Bool(true) => Some(String::from(TOGGLE_ON)),
                        Value::Bool(false) => Some(String::from(TOGGLE_OFF)),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    };
                    // A coerced value still has to suit the field, e.g. 5 is no toggle.
                    coerced
                        .filter(|v| preference.kind.check_value(&preference.id, v).is_ok())
                        .unwrap_or_else(|| preference.default_value.clone())
                }
            };

            record.insert(preference.id.clone(), replacement);
        }

        MigrationOutcome::Migrated(MigrationReport {
            record,
            repaired,
            injected,
        })
    }

    /// The first identity field that is missing or null-like, if any.
    pub fn invalid_identity_field(&self, record: &Record) -> Option<&'a str> {
        self.catalog
            .identity_fields()
            .find(|identity| is_null_like(record.get(&identity.id)))
            .map(|identity| identity.id.as_str())
    }
}
