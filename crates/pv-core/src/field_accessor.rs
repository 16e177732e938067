//! Name-based reads and writes over a [`Record`], validated against a [`Catalog`].

use crate::{Catalog, CoreError, CoreResult, FieldLookup, Preference, Record};

#[derive(Debug, Clone, Copy)]
pub struct FieldAccessor<'a> {
    catalog: &'a Catalog,
    lookup: FieldLookup,
}

impl<'a> FieldAccessor<'a> {
    pub fn new(catalog: &'a Catalog, lookup: FieldLookup) -> Self {
        Self { catalog, lookup }
    }

    pub fn exact(catalog: &'a Catalog) -> Self {
        Self::new(catalog, FieldLookup::Exact)
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn lookup(&self) -> FieldLookup {
        self.lookup
    }

    /// Maps a caller-supplied name to its catalog entry.
    #[track_caller]
    pub fn resolve(&self, name: &str) -> CoreResult<&'a Preference> {
        self.lookup
            .resolve(self.catalog, name)
            .ok_or_else(|| CoreError::unknown_field(name))
    }

    /// Reads a field as a string.
    ///
    /// Names outside the catalog fall back to an exact key match so legacy
    /// fields stay readable. Non-string values read as `None`.
    pub fn get_field<'r>(&self, record: &'r Record, name: &str) -> Option<&'r str> {
        match self.lookup.resolve(self.catalog, name) {
            Some(preference) => record.get_str(&preference.id),
            None => record.get_str(name),
        }
    }

    /// Writes a catalog field. On error the record is left untouched.
    #[track_caller]
    pub fn set_field(
        &self,
        record: &mut Record,
        name: &str,
        value: &str,
    ) -> CoreResult<&'a Preference> {
        let preference = self.resolve(name)?;
        preference.kind.check_value(&preference.id, value)?;
        record.insert(preference.id.clone(), value);
        Ok(preference)
    }
}
