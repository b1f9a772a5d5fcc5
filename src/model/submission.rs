use crate::error::{Error, ErrorType, Result};
use crate::model::record::Record;
use crate::model::value::Value;
use serde::Deserialize;
use serde_json::Map;

/// Fields that every new entry must carry.
pub const MANDATORY: &[&str] = &["date", "shop", "item", "total_kg"];

/// A new entry as it arrives from the form or the command line, before it has been checked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Submission(Map<String, serde_json::Value>);

impl Submission {
    /// Anything other than a JSON object is treated as an empty submission.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// Sets `field`, keeping its position if it is already present.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Checks that every mandatory field is present and converts the submission into a `Record`.
    /// A mandatory field counts as missing when it is absent, `null`, `false`, zero, or empty.
    /// Fields that are `null` are left out of the record.
    pub fn validate(self) -> Result<Record> {
        for &field in MANDATORY {
            if is_missing(self.0.get(field)) {
                return Err(Error::msg(
                    ErrorType::Validation,
                    format!("{field} is mandatory"),
                ));
            }
        }
        Ok(self
            .0
            .iter()
            .filter_map(|(name, value)| Value::from_json(value).map(|v| (name.clone(), v)))
            .collect())
    }
}

fn is_missing(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::Bool(b)) => !b,
        Some(serde_json::Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(serde_json::Value::String(s)) => s.is_empty(),
        Some(serde_json::Value::Array(a)) => a.is_empty(),
        Some(serde_json::Value::Object(o)) => o.is_empty(),
    }
}
