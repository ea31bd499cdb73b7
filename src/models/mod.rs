//! Data model: records, schemas and snapshots.

pub mod record;
pub mod schema;
pub mod snapshot;

pub use record::{FieldValue, Position, Record};
pub use schema::{Column, FieldKind, RecordSchema};
pub use snapshot::{PayloadKind, Snapshot};
