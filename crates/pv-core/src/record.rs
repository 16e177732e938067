use crate::{CoreError, CoreResult};

use serde::Serialize;
use serde_json::{Map, Value};

/// An ordered field-id to value mapping, one per user.
///
/// Field order is the order fields were first written, so re-serializing a
/// record never reorders what was already on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the single-line JSON object stored in a record file.
    #[track_caller]
    pub fn parse(text: &str) -> CoreResult<Self> {
        let value: Value =
            serde_json::from_str(text.trim()).map_err(|e| CoreError::unparsable(e.to_string()))?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(CoreError::unparsable(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Single-line form written to disk. No trailing newline.
    pub fn to_canonical(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    pub fn get(&self, field_id: &str) -> Option<&Value> {
        self.fields.get(field_id)
    }

    pub fn get_str(&self, field_id: &str) -> Option<&str> {
        self.fields.get(field_id).and_then(Value::as_str)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.fields.contains_key(field_id)
    }

    /// Sets a field. Existing keys keep their position, new keys go last.
    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<String>) {
        self.fields
            .insert(field_id.into(), Value::String(value.into()));
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Whether a stored value counts as absent: missing, JSON null, blank,
/// the literal text `null`, or a nested array/object.
pub fn is_null_like(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Bool(_)) | Some(Value::Number(_)) => false,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
