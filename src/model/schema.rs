//! The per-field typing rules applied when a record is stored and when the ledger is read.

use crate::model::record::{Record, TNO};
use crate::model::value::{self, parse_decimal, Value};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// The expected type of a field.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text. Never coerced, so a shop called `"0042"` stays `"0042"`.
    Text,
    /// A whole number, such as the transaction number.
    Integer,
    /// A number rounded to two decimal places.
    Number,
    /// A field the schema does not know about: numbers are rounded to two decimal places and
    /// anything else is kept as given.
    #[default]
    Auto,
}

serde_plain::derive_display_from_serialize!(FieldKind);
serde_plain::derive_fromstr_from_deserialize!(FieldKind);

/// Maps field names to the `FieldKind` they are stored as.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Schema {
    fields: Vec<(String, FieldKind)>,
}

impl Default for Schema {
    /// The fields of a daily sales entry.
    fn default() -> Self {
        Self::new([
            (TNO, FieldKind::Integer),
            ("date", FieldKind::Text),
            ("shop", FieldKind::Text),
            ("item", FieldKind::Text),
            ("total_kg", FieldKind::Number),
        ])
    }
}

impl Schema {
    pub fn new<S, I>(fields: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, FieldKind)>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, kind)| (name.into(), kind))
                .collect(),
        }
    }

    /// The kind of `field`, `FieldKind::Auto` for fields that are not declared.
    pub fn kind(&self, field: &str) -> FieldKind {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, kind)| *kind)
            .unwrap_or_default()
    }

    /// Normalizes a submitted value for storage. Values that cannot be coerced to the field's
    /// kind are kept unchanged.
    pub fn normalize(&self, field: &str, value: Value) -> Value {
        match self.kind(field) {
            FieldKind::Text => match value {
                Value::Text(_) => value,
                other => Value::Text(other.to_string()),
            },
            FieldKind::Integer => to_integer(value),
            FieldKind::Number | FieldKind::Auto => match value.as_decimal() {
                Some(d) => Value::Number(value::round(d)),
                None => value,
            },
        }
    }

    /// Normalizes every field of `record`, keeping the field order.
    pub fn normalize_record(&self, record: Record) -> Record {
        record
            .into_iter()
            .map(|(name, value)| {
                let value = self.normalize(&name, value);
                (name, value)
            })
            .collect()
    }

    /// Reads a cell of the persisted table. Empty cells are absent. Stored numbers are taken as
    /// they are, without rounding again.
    pub fn parse_cell(&self, field: &str, cell: &str) -> Option<Value> {
        if cell.trim().is_empty() {
            return None;
        }
        let text = Value::Text(cell.to_string());
        Some(match self.kind(field) {
            FieldKind::Text => text,
            FieldKind::Integer => to_integer(text),
            FieldKind::Number | FieldKind::Auto => match parse_decimal(cell) {
                Some(d) => Value::Number(d),
                None => text,
            },
        })
    }
}

/// Integral numbers become `Value::Integer`, other numbers stay numbers, and text that is not a
/// number is left alone.
fn to_integer(value: Value) -> Value {
    if let Value::Integer(_) = value {
        return value;
    }
    match value.as_decimal() {
        Some(d) if d.fract().is_zero() => match d.to_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Number(d),
        },
        Some(d) => Value::Number(d),
        None => value,
    }
}
