//! Payload decoding.
//!
//! List payloads are validated record by record against the screen's
//! [`RecordSchema`]; the first violation rejects the whole payload so a
//! half-decoded list can never become current.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{json_type_name, DecodeError};
use crate::models::{
    Column, FieldKind, FieldValue, PayloadKind, Position, Record, RecordSchema, Snapshot,
};

const NAME_KEY: &str = "name";
const LOCATION_KEY: &str = "location";

/// Key used by the fleet server's enum encoder: `{"__enum__": "TruckState.BUSY"}`.
const ENUM_MARKER: &str = "__enum__";

/// Decode a response body according to the declared payload kind.
pub fn decode(body: &[u8], kind: &PayloadKind) -> Result<Snapshot, DecodeError> {
    match kind {
        PayloadKind::List(schema) => decode_records(body, schema).map(Snapshot::List),
        PayloadKind::Text => decode_text(body).map(Snapshot::Text),
    }
}

/// Raw body as UTF-8, untouched.
pub fn decode_text(body: &[u8]) -> Result<String, DecodeError> {
    Ok(String::from_utf8(body.to_vec())?)
}

/// Parse a JSON array into records, preserving order.
pub fn decode_records(body: &[u8], schema: &RecordSchema) -> Result<Vec<Record>, DecodeError> {
    let value: Value = serde_json::from_slice(body)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(DecodeError::NotAList {
                found: json_type_name(&other),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_record(index, item, schema))
        .collect()
}

fn decode_record(index: usize, item: &Value, schema: &RecordSchema) -> Result<Record, DecodeError> {
    let object = item.as_object().ok_or(DecodeError::RecordNotObject {
        index,
        found: json_type_name(item),
    })?;

    let name = match present(object, NAME_KEY) {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(DecodeError::InvalidField {
                index,
                field: NAME_KEY.to_string(),
                expected: "a string",
            })
        }
        None => return Err(missing(index, NAME_KEY)),
    };

    let position = match present(object, LOCATION_KEY) {
        Some(raw) => Position::deserialize(raw).map_err(|_| DecodeError::InvalidField {
            index,
            field: LOCATION_KEY.to_string(),
            expected: "an {x, y} object or a string",
        })?,
        None => return Err(missing(index, LOCATION_KEY)),
    };

    let mut record = Record::new(name, position);
    for column in &schema.columns {
        match column.keys().find_map(|key| present(object, key)) {
            Some(raw) => record.insert_field(column.key.clone(), decode_field(index, column, raw)?),
            None if column.required => return Err(missing(index, &column.key)),
            None => {}
        }
    }
    Ok(record)
}

fn decode_field(index: usize, column: &Column, raw: &Value) -> Result<FieldValue, DecodeError> {
    let value = scalar(raw).ok_or_else(|| invalid(index, column))?;
    let accepted = match (column.kind, &value) {
        (FieldKind::Any, _) => true,
        (FieldKind::Number, FieldValue::Number(_)) => true,
        (FieldKind::Text, FieldValue::Text(_)) => true,
        _ => false,
    };
    if accepted {
        Ok(value)
    } else {
        Err(invalid(index, column))
    }
}

/// Convert a JSON scalar (or an encoded enum member) to a field value.
fn scalar(raw: &Value) -> Option<FieldValue> {
    match raw {
        Value::Number(n) => Some(FieldValue::Number(n.clone())),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Bool(b) => Some(FieldValue::Flag(*b)),
        Value::Object(map) if map.len() == 1 => match map.get(ENUM_MARKER) {
            Some(Value::String(member)) => {
                let variant = member.rsplit('.').next().unwrap_or(member);
                Some(FieldValue::Text(variant.to_string()))
            }
            _ => None,
        },
        _ => None,
    }
}

/// A key counts as present only if it is there and not `null`.
fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn missing(index: usize, field: &str) -> DecodeError {
    DecodeError::MissingField {
        index,
        field: field.to_string(),
    }
}

fn invalid(index: usize, column: &Column) -> DecodeError {
    DecodeError::InvalidField {
        index,
        field: column.key.clone(),
        expected: column.kind.expected(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck_schema() -> RecordSchema {
        RecordSchema::new(vec![
            Column::text("status", "Status"),
            Column::number("fuel_level", "Fuel Level"),
            Column::number("trash_level", "Trash Level"),
        ])
    }

    #[test]
    fn test_decode_empty_list() {
        let records = decode_records(b"[]", &truck_schema()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_preserves_order_and_length() {
        let body = br#"[
            {"name": "T3", "location": {"x": 3, "y": 3}},
            {"name": "T1", "location": {"x": 1, "y": 1}},
            {"name": "T2", "location": "Depot"}
        ]"#;
        let records = decode_records(body, &truck_schema()).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["T3", "T1", "T2"]);
    }

    #[test]
    fn test_decode_full_truck() {
        let body = br#"[{"name":"T1","location":{"x":1,"y":2},"fuel_level":50,"trash_level":10}]"#;
        let records = decode_records(body, &truck_schema()).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "T1");
        assert_eq!(record.position, Position::coordinates(1, 2));
        assert_eq!(record.field("fuel_level"), Some(&FieldValue::from(50i64)));
        assert_eq!(record.field("trash_level"), Some(&FieldValue::from(10i64)));
        assert!(record.field("status").is_none());
    }

    #[test]
    fn test_decode_enum_encoded_status() {
        let body = br#"[{"name":"T1","location":{"x":0,"y":0},"status":{"__enum__":"TruckState.BUSY"}}]"#;
        let records = decode_records(body, &truck_schema()).unwrap();
        assert_eq!(records[0].field("status"), Some(&FieldValue::from("BUSY")));
    }

    #[test]
    fn test_null_optional_field_is_absent() {
        let body = br#"[{"name":"T1","location":"Yard","fuel_level":null}]"#;
        let records = decode_records(body, &truck_schema()).unwrap();
        assert!(records[0].field("fuel_level").is_none());
    }

    #[test]
    fn test_alias_key_is_stored_under_canonical_key() {
        let schema = RecordSchema::new(vec![Column::number("trash_level", "Value")
            .alias("value")
            .required()]);
        let body = br#"[{"name":"D1","location":{"x":4,"y":5},"value":7}]"#;
        let records = decode_records(body, &schema).unwrap();
        assert_eq!(records[0].field("trash_level"), Some(&FieldValue::from(7i64)));
    }

    #[test]
    fn test_missing_required_field() {
        let schema = RecordSchema::new(vec![Column::number("trash_level", "Value").required()]);
        let body = br#"[{"name":"D1","location":{"x":4,"y":5}}]"#;
        assert_eq!(
            decode_records(body, &schema).unwrap_err(),
            DecodeError::MissingField {
                index: 0,
                field: "trash_level".to_string()
            }
        );
    }

    #[test]
    fn test_missing_location() {
        let body = br#"[{"name":"T1","location":{"x":1,"y":2}},{"name":"T2"}]"#;
        assert_eq!(
            decode_records(body, &truck_schema()).unwrap_err(),
            DecodeError::MissingField {
                index: 1,
                field: "location".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_field_type() {
        let body = br#"[{"name":"T1","location":"Yard","fuel_level":"full"}]"#;
        assert_eq!(
            decode_records(body, &truck_schema()).unwrap_err(),
            DecodeError::InvalidField {
                index: 0,
                field: "fuel_level".to_string(),
                expected: "a number"
            }
        );
    }

    #[test]
    fn test_nested_field_is_rejected() {
        let body = br#"[{"name":"T1","location":"Yard","status":["IDLE"]}]"#;
        assert!(matches!(
            decode_records(body, &truck_schema()),
            Err(DecodeError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_bad_location_shape() {
        let body = br#"[{"name":"T1","location":{"lat":1}}]"#;
        assert!(matches!(
            decode_records(body, &truck_schema()),
            Err(DecodeError::InvalidField { field, .. }) if field == "location"
        ));
    }

    #[test]
    fn test_not_a_list() {
        assert_eq!(
            decode_records(br#"{"name":"T1"}"#, &truck_schema()).unwrap_err(),
            DecodeError::NotAList { found: "an object" }
        );
    }

    #[test]
    fn test_element_not_object() {
        assert_eq!(
            decode_records(b"[1]", &truck_schema()).unwrap_err(),
            DecodeError::RecordNotObject {
                index: 0,
                found: "a number"
            }
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            decode_records(b"<html>", &truck_schema()),
            Err(DecodeError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_decode_text_verbatim() {
        assert_eq!(decode_text(b"A\nB").unwrap(), "A\nB");
        assert_eq!(decode_text(b"  # T \n\n").unwrap(), "  # T \n\n");
    }

    #[test]
    fn test_decode_text_rejects_invalid_utf8() {
        assert!(matches!(
            decode_text(&[0x41, 0xff]),
            Err(DecodeError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_decode_dispatches_on_kind() {
        let text = decode(b"[]", &PayloadKind::Text).unwrap();
        assert_eq!(text, Snapshot::Text("[]".to_string()));

        let list = decode(b"[]", &PayloadKind::list(truck_schema())).unwrap();
        assert_eq!(list, Snapshot::List(Vec::new()));
    }
}
