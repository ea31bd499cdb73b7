//! The polling-refresh core.
//!
//! - [`config`] - immutable [`PollConfig`]
//! - [`decode`] - body to [`Snapshot`](crate::models::Snapshot) per payload kind
//! - [`source`] - [`PollingSource`], the per-screen fetch loop
//! - [`events`] - [`PollEvent`] notifications for the render side

pub mod config;
pub mod decode;
pub mod events;
pub mod source;

pub use config::{PollConfig, PollConfigError};
pub use decode::{decode, decode_records, decode_text};
pub use events::PollEvent;
pub use source::{fetch_snapshot, PollingSource};
