//! Render-ready views of snapshots.
//!
//! A [`View`] is plain strings in display order. Styling is left to the
//! terminal UI; [`plain`] prints the same view without a terminal.

pub mod plain;
mod snapshot_view;

pub use snapshot_view::SnapshotView;

/// A rendered table: headers, the column key behind each header, and one
/// row of cells per record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<String>,
    /// `name`, `location`, then each declared column key.
    pub keys: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub fn cell(&self, row: usize, key: &str) -> Option<&str> {
        let column = self.column_index(key)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Table(TableView),
    Text { content: String },
}

impl View {
    pub fn as_table(&self) -> Option<&TableView> {
        match self {
            View::Table(table) => Some(table),
            View::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            View::Text { content } => Some(content),
            View::Table(_) => None,
        }
    }

    /// Rows for a table, lines for text.
    pub fn line_count(&self) -> usize {
        match self {
            View::Table(table) => table.rows.len(),
            View::Text { content } => content.lines().count(),
        }
    }
}
