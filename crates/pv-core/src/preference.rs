use crate::FieldKind;

use serde::Serialize;

/// One entry of the preference catalog: a field id and the value a record gets
/// when the field is missing or null-like.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Preference {
    pub id: String,
    pub kind: FieldKind,
    pub default_value: String,
    /// Label shown by settings screens; `None` for fields edited elsewhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Preference {
    pub fn identity(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Identity,
            default_value: String::new(),
            display_name: None,
            description: None,
        }
    }

    pub fn toggle(
        id: impl Into<String>,
        default_value: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Toggle,
            default_value: default_value.into(),
            display_name: Some(display_name.into()),
            description: Some(description.into()),
        }
    }

    pub fn text(id: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Text,
            default_value: default_value.into(),
            display_name: None,
            description: None,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.kind == FieldKind::Identity
    }
}
