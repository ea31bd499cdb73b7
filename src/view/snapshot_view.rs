use std::sync::Arc;

use super::{TableView, View};
use crate::models::{PayloadKind, Record, RecordSchema, Snapshot};

pub const NAME_KEY: &str = "name";
pub const POSITION_KEY: &str = "location";

/// Turns snapshots of one screen into [`View`]s.
///
/// Rendering is pure: the same snapshot always yields the same view.
#[derive(Debug, Clone)]
pub struct SnapshotView {
    schema: Arc<RecordSchema>,
}

impl SnapshotView {
    pub fn new(kind: &PayloadKind) -> Self {
        let schema = match kind {
            PayloadKind::List(schema) => Arc::clone(schema),
            PayloadKind::Text => Arc::new(RecordSchema::default()),
        };
        Self { schema }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn render(&self, snapshot: &Snapshot) -> View {
        match snapshot {
            Snapshot::List(records) => View::Table(self.table(records)),
            Snapshot::Text(content) => View::Text {
                content: content.clone(),
            },
        }
    }

    fn table(&self, records: &[Record]) -> TableView {
        let mut keys = Vec::with_capacity(self.schema.columns.len() + 2);
        keys.push(NAME_KEY.to_string());
        keys.push(POSITION_KEY.to_string());
        keys.extend(self.schema.columns.iter().map(|c| c.key.clone()));

        TableView {
            headers: self.schema.headers(),
            keys,
            rows: records.iter().map(|r| self.row(r)).collect(),
        }
    }

    fn row(&self, record: &Record) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.schema.columns.len() + 2);
        cells.push(record.name.clone());
        cells.push(record.position.to_string());
        for column in &self.schema.columns {
            // Optional columns the server left out render blank.
            cells.push(
                record
                    .field(&column.key)
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            );
        }
        cells
    }
}
