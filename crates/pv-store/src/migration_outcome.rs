use pv_core::Record;

use std::fmt;

/// Result of running the migration engine over one record.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    Migrated(MigrationReport),
    Invalid(InvalidReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationReport {
    /// The record with every catalog field present and valid.
    pub record: Record,
    /// Fields that held a null-like or non-string value and were rewritten.
    pub repaired: Vec<String>,
    /// Catalog fields that were missing and appended with their default.
    pub injected: Vec<String>,
}

impl MigrationReport {
    pub fn changed(&self) -> bool {
        !self.repaired.is_empty() || !self.injected.is_empty()
    }
}

/// Why a record could not be migrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The file was empty or held only a null literal.
    Empty,
    Unparsable { message: String },
    /// An identity field was missing, null or blank.
    FatalField { field_id: String },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "record file is empty"),
            Self::Unparsable { message } => write!(f, "record is unparsable: {message}"),
            Self::FatalField { field_id } => {
                write!(f, "identity field {field_id:?} is missing or empty")
            }
        }
    }
}
