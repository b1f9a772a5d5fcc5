//! The scalar value held in a single ledger cell.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Numbers are stored, and displayed, with this many decimal places.
pub const DECIMAL_PLACES: u32 = 2;

/// A scalar value in a `Record`.
///
/// Equality is structural, so `Integer(1)` and `Number(1.00)` are different values. Use
/// `Value::as_decimal` for numeric comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(String),
    Integer(i64),
    Number(Decimal),
}

impl Value {
    /// The numeric reading of this value. Text is parsed; text that is not a number gives `None`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Text(s) => parse_decimal(s),
            Value::Integer(i) => Some(Decimal::from(*i)),
            Value::Number(d) => Some(*d),
        }
    }

    /// Converts a JSON value into a `Value`. `null` has no cell representation and gives `None`.
    /// Booleans, arrays and objects are kept as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            serde_json::Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n
                    .as_f64()
                    .and_then(Decimal::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::Text(n.to_string())),
            }),
            other => Some(Value::Text(other.to_string())),
        }
    }

    /// The text written to a cell of the persisted table. Numbers always carry two decimal
    /// places, which is a display format only: parsing the cell gives back an equal number.
    pub fn to_cell(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Number(d) => {
                let mut shown = round(*d);
                shown.rescale(DECIMAL_PLACES);
                shown.to_string()
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => Display::fmt(s, f),
            Value::Integer(i) => Display::fmt(i, f),
            Value::Number(d) => Display::fmt(&d.normalize(), f),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Number(Decimal::from(value)),
        }
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Number(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Number(d) => match d.to_f64() {
                Some(f) => serializer.serialize_f64(f),
                None => serializer.serialize_str(&d.to_string()),
            },
        }
    }
}

/// Parses `s` as a decimal number, allowing surrounding whitespace and scientific notation.
pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Rounds `d` to `DECIMAL_PLACES`, midpoints away from zero.
pub(crate) fn round(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
