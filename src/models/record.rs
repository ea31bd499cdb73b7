//! Decoded list items.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;

/// Where a record is.
///
/// Servers send either a coordinate object (`{"x": 1, "y": 2}`) or an
/// opaque display string; both are kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Coordinates { x: Number, y: Number },
    Label(String),
}

impl Position {
    pub fn coordinates(x: impl Into<Number>, y: impl Into<Number>) -> Self {
        Position::Coordinates {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Position::Label(label.into())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Coordinates { x, y } => write!(f, "{}, {}", x, y),
            Position::Label(label) => f.write_str(label),
        }
    }
}

/// A scalar status value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(Number),
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// One decoded list item (a truck, a dumpster).
///
/// Only the fields declared by the screen's schema are kept, keyed by the
/// column's canonical key.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub position: Position,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert_field(key, value);
        self
    }

    pub fn insert_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_display() {
        assert_eq!(Position::coordinates(1, 2).to_string(), "1, 2");
    }

    #[test]
    fn test_float_coordinates_display() {
        let position: Position = serde_json::from_str(r#"{"x": 1.5, "y": -3}"#).unwrap();
        assert_eq!(position.to_string(), "1.5, -3");
    }

    #[test]
    fn test_label_is_verbatim() {
        let position: Position = serde_json::from_str(r#""Depot, bay 4""#).unwrap();
        assert_eq!(position, Position::label("Depot, bay 4"));
        assert_eq!(position.to_string(), "Depot, bay 4");
    }

    #[test]
    fn test_coordinates_ignore_extra_keys() {
        let position: Position = serde_json::from_str(r#"{"x": 0, "y": 9, "z": 1}"#).unwrap();
        assert_eq!(position, Position::coordinates(0, 9));
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::from(50i64).to_string(), "50");
        assert_eq!(FieldValue::from("BUSY").to_string(), "BUSY");
        assert_eq!(FieldValue::Flag(true).to_string(), "true");
    }

    #[test]
    fn test_record_fields() {
        let record = Record::new("T1", Position::coordinates(1, 2))
            .with_field("fuel_level", 50i64)
            .with_field("status", "IDLE");
        assert_eq!(record.field("fuel_level").and_then(FieldValue::as_f64), Some(50.0));
        assert_eq!(record.field("status").and_then(FieldValue::as_str), Some("IDLE"));
        assert!(record.field("trash_level").is_none());
    }
}
