use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown field: {name} {location}")]
    UnknownField {
        name: String,
        location: ErrorLocation,
    },

    #[error("Invalid value for field {field}: {message} {location}")]
    InvalidValue {
        field: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unparsable record: {message} {location}")]
    Unparsable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid catalog: {message} {location}")]
    InvalidCatalog {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid user id {value:?}: {message} {location}")]
    InvalidUserId {
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to serialize record: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Creates UnknownField error at caller location.
    #[track_caller]
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidValue error at caller location.
    #[track_caller]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Unparsable error at caller location.
    #[track_caller]
    pub fn unparsable(message: impl Into<String>) -> Self {
        Self::Unparsable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidCatalog error at caller location.
    #[track_caller]
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidUserId error at caller location.
    #[track_caller]
    pub fn invalid_user_id(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUserId {
            value: value.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
