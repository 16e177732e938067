use crate::{CoreError, CoreResult};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque user identifier. Doubles as the user's directory name, so it may
/// not contain path separators or be a relative path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    #[track_caller]
    pub fn new(value: impl Into<String>) -> CoreResult<Self> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(CoreError::invalid_user_id(value, "cannot be empty"));
        }
        if value == "." || value == ".." {
            return Err(CoreError::invalid_user_id(
                value,
                "cannot be a relative path component",
            ));
        }
        if value.contains(['/', '\\', '\0']) {
            return Err(CoreError::invalid_user_id(
                value,
                "cannot contain path separators",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
