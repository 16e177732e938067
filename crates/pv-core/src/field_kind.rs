use crate::{CoreError, CoreResult, TOGGLE_OFF, TOGGLE_ON};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a catalog field is validated and repaired.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Identifies the user. Never defaulted; a null-like value makes the record corrupt.
    Identity,
    /// A `"0"` / `"1"` switch.
    Toggle,
    /// Free-form text such as a color, font or format string.
    Text,
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Identity => "identity",
            Self::Toggle => "toggle",
            Self::Text => "text",
        }
    }

    /// Whether a null-like value in this field makes the whole record unrecoverable.
    pub fn is_fatal_when_invalid(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Checks a value about to be written through the field accessor.
    #[track_caller]
    pub fn check_value(&self, field_id: &str, value: &str) -> CoreResult<()> {
        match self {
            Self::Identity if value.trim().is_empty() => Err(CoreError::invalid_value(
                field_id,
                "identity fields cannot be empty",
            )),
            Self::Toggle if value != TOGGLE_ON && value != TOGGLE_OFF => {
                Err(CoreError::invalid_value(
                    field_id,
                    format!("toggle expects \"{TOGGLE_OFF}\" or \"{TOGGLE_ON}\", got {value:?}"),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for FieldKind {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "identity" => Ok(Self::Identity),
            "toggle" => Ok(Self::Toggle),
            "text" => Ok(Self::Text),
            _ => Err(CoreError::invalid_catalog(format!("unknown field kind {s:?}"))),
        }
    }
}
