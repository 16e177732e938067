use crate::{CorruptionReport, GateError};

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use pv_core::CoreError;
use thiserror::Error;

/// Errors raised by the profile store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No record for user {user_id} at {path} {location}")]
    NotFound {
        user_id: String,
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Failed to read record at {path}: {source} {location}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Record at {path} is not valid: {message} {location}")]
    Unparsable {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity field {field} is missing or empty for user {user_id} {location}")]
    FatalFieldInvalid {
        user_id: String,
        field: String,
        location: ErrorLocation,
    },

    #[error("Failed to write {path}: {source} {location}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{source} {location}")]
    Gate {
        #[source]
        source: GateError,
        location: ErrorLocation,
    },

    #[error("Record for user {user_id} was quarantined: {cause}")]
    Corrupted {
        user_id: String,
        #[source]
        cause: Box<StoreError>,
        /// Present when files were left behind in the user directory.
        report: Option<CorruptionReport>,
        location: ErrorLocation,
    },

    #[error("Failed to quarantine {path}: {source} {location}")]
    Quarantine {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to manage user directory {path}: {source} {location}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("No free user id after {attempts} attempts {location}")]
    IdAllocation {
        attempts: usize,
        location: ErrorLocation,
    },

    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to archive {path}: {message} {location}")]
    Archive {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
    /// Short description of why a record is being quarantined, for reports and audit lines.
    pub fn corruption_reason(&self) -> String {
        match self {
            Self::NotFound { .. } => String::from("record file is missing"),
            Self::Unreadable { source, .. } => format!("record file is unreadable: {source}"),
            Self::Unparsable { message, .. } => format!("record is unparsable: {message}"),
            Self::FatalFieldInvalid { field, .. } => {
                format!("identity field {field:?} is missing or empty")
            }
            other => other.to_string(),
        }
    }

    /// Whether this error is recoverable via retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Unreadable { .. }
                | Self::WriteFailure { .. }
                | Self::Gate {
                    source: GateError::Timeout { .. },
                    ..
                }
        )
    }

    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "The user does not exist. Create it or pick another user.",
            Self::Unreadable { .. } => {
                "Unable to read the user's data file. \
                   The file may be locked by another process."
            }
            Self::Unparsable { .. } | Self::FatalFieldInvalid { .. } | Self::Corrupted { .. } => {
                "The user's data file was corrupted and has been quarantined. \
                   Remaining files are listed in the corruption report."
            }
            Self::WriteFailure { .. } | Self::Directory { .. } => {
                "Unable to write to the profile directory. \
                   Check disk space and file permissions."
            }
            Self::Core(CoreError::UnknownField { .. }) => {
                "Unknown preference name. Run `pv catalog` to list valid fields."
            }
            Self::Core(_) | Self::Validation { .. } => "The request was rejected. Check the input.",
            Self::Gate {
                source: GateError::Timeout { .. },
                ..
            } => "The profile store is busy. Try again.",
            Self::Gate { .. } => "The profile store is shutting down.",
            Self::Quarantine { .. } | Self::Archive { .. } => {
                "Unable to quarantine a corrupted record. \
                   Check file permissions in the quarantine directory."
            }
            Self::IdAllocation { .. } => {
                "Unable to allocate a unique user id. Please report this issue."
            }
        }
    }

    /// Creates NotFound error at caller location.
    #[track_caller]
    pub fn not_found(user_id: impl Into<String>, path: PathBuf) -> Self {
        Self::NotFound {
            user_id: user_id.into(),
            path,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Unreadable error at caller location.
    #[track_caller]
    pub fn unreadable(path: PathBuf, source: std::io::Error) -> Self {
        Self::Unreadable {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Unparsable error at caller location.
    #[track_caller]
    pub fn unparsable(path: PathBuf, message: impl Into<String>) -> Self {
        Self::Unparsable {
            path,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates FatalFieldInvalid error at caller location.
    #[track_caller]
    pub fn fatal_field(user_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self::FatalFieldInvalid {
            user_id: user_id.into(),
            field: field.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates WriteFailure error at caller location.
    #[track_caller]
    pub fn write_failure(path: PathBuf, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Corrupted error at caller location.
    #[track_caller]
    pub fn corrupted(
        user_id: impl Into<String>,
        cause: StoreError,
        report: Option<CorruptionReport>,
    ) -> Self {
        Self::Corrupted {
            user_id: user_id.into(),
            cause: Box::new(cause),
            report,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Quarantine error at caller location.
    #[track_caller]
    pub fn quarantine(path: PathBuf, source: std::io::Error) -> Self {
        Self::Quarantine {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Directory error at caller location.
    #[track_caller]
    pub fn directory(path: PathBuf, source: std::io::Error) -> Self {
        Self::Directory {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates IdAllocation error at caller location.
    #[track_caller]
    pub fn id_allocation(attempts: usize) -> Self {
        Self::IdAllocation {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Validation error at caller location.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Archive error at caller location.
    #[track_caller]
    pub fn archive(path: PathBuf, message: impl Into<String>) -> Self {
        Self::Archive {
            path,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<GateError> for StoreError {
    #[track_caller]
    fn from(source: GateError) -> Self {
        Self::Gate {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
