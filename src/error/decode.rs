//! Payload decode failures: the body arrived but does not match the
//! declared payload kind or the screen's record schema.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON array, found {found}")]
    NotAList { found: &'static str },

    #[error("record {index}: expected a JSON object, found {found}")]
    RecordNotObject { index: usize, found: &'static str },

    #[error("record {index}: missing required field `{field}`")]
    MissingField { index: usize, field: String },

    #[error("record {index}: field `{field}` should be {expected}")]
    InvalidField {
        index: usize,
        field: String,
        expected: &'static str,
    },

    #[error("text payload is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::InvalidJson(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DecodeError::InvalidUtf8(err.to_string())
    }
}

/// JSON type name used in decode error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = DecodeError::MissingField {
            index: 2,
            field: "location".to_string(),
        };
        assert_eq!(err.to_string(), "record 2: missing required field `location`");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let err: DecodeError = json_err.into();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&serde_json::json!(null)), "null");
        assert_eq!(json_type_name(&serde_json::json!({})), "an object");
        assert_eq!(json_type_name(&serde_json::json!("x")), "a string");
    }
}
