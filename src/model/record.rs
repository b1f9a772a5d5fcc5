use crate::model::value::Value;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The name of the transaction number field.
pub const TNO: &str = "TNo";

/// A transaction number.
pub type Tno = u64;

/// One row of the ledger: an ordered mapping from field name to `Value`.
///
/// Fields keep the order in which they were first inserted. Serializes as a JSON object in that
/// order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Sets `field` to `value`. An existing field is replaced where it stands, a new field goes
    /// at the end. Returns the previous value, if any.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((field, value));
                None
            }
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        let ix = self.fields.iter().position(|(name, _)| name == field)?;
        Some(self.fields.remove(ix).1)
    }

    /// The field names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// The numeric value of the `TNo` field, if it has one.
    pub fn tno(&self) -> Option<Decimal> {
        self.get(TNO).and_then(Value::as_decimal)
    }

    /// Whether this record's `TNo` is numerically equal to `tno`.
    pub fn has_tno(&self, tno: Tno) -> bool {
        self.tno() == Some(Decimal::from(tno))
    }
}

impl<S, V> FromIterator<(S, V)> for Record
where
    S: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (S, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record: Record = [("date", "01/01/2024"), ("TNo", "99"), ("shop", "A")]
            .into_iter()
            .collect();
        let old = record.insert(TNO, Value::Integer(1));
        assert_eq!(old, Some(Value::from("99")));
        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, vec!["date", "TNo", "shop"]);
        assert!(record.has_tno(1));
    }

    #[test]
    fn test_has_tno_numeric_equality() {
        let mut record = Record::new();
        record.insert(TNO, Value::Number(Decimal::new(200, 2)));
        assert!(record.has_tno(2));
        assert!(!record.has_tno(3));

        record.insert(TNO, "2");
        assert!(record.has_tno(2));

        record.insert(TNO, "two");
        assert!(!record.has_tno(2));
        assert_eq!(record.remove(TNO), Some(Value::from("two")));
        assert_eq!(record.tno(), None);
    }

    #[test]
    fn test_serialize_keeps_order() {
        let mut record = Record::new();
        record.insert("shop", "A");
        record.insert("item", "Rice");
        record.insert(TNO, Value::Integer(1));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"shop":"A","item":"Rice","TNo":1}"#);
    }
}
