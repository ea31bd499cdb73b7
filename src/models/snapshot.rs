//! Snapshots and payload kinds.

use std::sync::Arc;

use super::record::Record;
use super::schema::RecordSchema;

/// What a source's endpoint returns, and therefore which snapshot shape it
/// holds for its whole life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadKind {
    /// JSON array of objects, validated against the schema.
    List(Arc<RecordSchema>),
    /// Raw text, used verbatim.
    Text,
}

impl PayloadKind {
    pub fn list(schema: RecordSchema) -> Self {
        PayloadKind::List(Arc::new(schema))
    }

    pub fn schema(&self) -> Option<&RecordSchema> {
        match self {
            PayloadKind::List(schema) => Some(schema),
            PayloadKind::Text => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::List(_) => "list",
            PayloadKind::Text => "text",
        }
    }
}

/// The most recent successfully decoded payload.
///
/// Never mutated after construction; a successful fetch replaces the whole
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    List(Vec<Record>),
    Text(String),
}

impl Snapshot {
    /// The initial snapshot for a payload kind: `[]` or `""`.
    pub fn empty_for(kind: &PayloadKind) -> Self {
        match kind {
            PayloadKind::List(_) => Snapshot::List(Vec::new()),
            PayloadKind::Text => Snapshot::Text(String::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Snapshot::List(records) => records.is_empty(),
            Snapshot::Text(text) => text.is_empty(),
        }
    }

    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Snapshot::List(records) => Some(records),
            Snapshot::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Snapshot::Text(text) => Some(text),
            Snapshot::List(_) => None,
        }
    }
}
