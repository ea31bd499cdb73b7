//! Per-screen record schemas.
//!
//! Each table screen declares its own columns. Screens do not share a
//! schema even when their columns look alike.

use serde::{Deserialize, Serialize};

/// The semantic type a column accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    Text,
    #[default]
    Any,
}

impl FieldKind {
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Number => "a number",
            FieldKind::Text => "a string",
            FieldKind::Any => "a scalar",
        }
    }
}

/// One declared scalar column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Canonical JSON key.
    pub key: String,
    pub header: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Alternative JSON keys, tried in order after `key`.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Column {
    pub fn new(key: impl Into<String>, header: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            kind,
            required: false,
            aliases: Vec::new(),
        }
    }

    pub fn number(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(key, header, FieldKind::Number)
    }

    pub fn text(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(key, header, FieldKind::Text)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Every JSON key this column reads from, canonical key first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

pub const DEFAULT_NAME_HEADER: &str = "Name";
pub const DEFAULT_POSITION_HEADER: &str = "Location";

/// The declared shape of a list payload.
///
/// `name` and `location` are always required; the scalar `columns` are
/// rendered after them in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub name_header: String,
    pub position_header: String,
    pub columns: Vec<Column>,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            name_header: DEFAULT_NAME_HEADER.to_string(),
            position_header: DEFAULT_POSITION_HEADER.to_string(),
            columns: Vec::new(),
        }
    }
}

impl RecordSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn with_name_header(mut self, header: impl Into<String>) -> Self {
        self.name_header = header.into();
        self
    }

    pub fn with_position_header(mut self, header: impl Into<String>) -> Self {
        self.position_header = header.into();
        self
    }

    /// All headers in render order.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(self.columns.len() + 2);
        headers.push(self.name_header.clone());
        headers.push(self.position_header.clone());
        headers.extend(self.columns.iter().map(|c| c.header.clone()));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_in_declared_order() {
        let schema = RecordSchema::new(vec![
            Column::number("fuel_level", "Fuel Level"),
            Column::number("trash_level", "Trash Level"),
        ])
        .with_name_header("Truck Name");

        assert_eq!(
            schema.headers(),
            vec!["Truck Name", "Location", "Fuel Level", "Trash Level"]
        );
    }

    #[test]
    fn test_column_keys_include_aliases() {
        let column = Column::number("trash_level", "Value").alias("value").required();
        assert!(column.required);
        assert_eq!(column.keys().collect::<Vec<_>>(), vec!["trash_level", "value"]);
    }

    #[test]
    fn test_column_deserialize_defaults() {
        let column: Column = toml::from_str(
            r#"
            key = "status"
            header = "Status"
            "#,
        )
        .unwrap();
        assert_eq!(column.kind, FieldKind::Any);
        assert!(!column.required);
        assert!(column.aliases.is_empty());
    }
}
