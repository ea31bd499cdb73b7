//! Notifications emitted by polling sources.

use crate::error::PollError;

/// Sent on the optional event channel passed to
/// [`PollingSource::start_with_events`](super::PollingSource::start_with_events).
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A fetch completed and its snapshot is now current.
    SnapshotReplaced { source: String },
    /// A fetch failed; the previous snapshot is still current.
    FetchFailed { source: String, error: PollError },
}

impl PollEvent {
    pub fn source(&self) -> &str {
        match self {
            PollEvent::SnapshotReplaced { source } | PollEvent::FetchFailed { source, .. } => source,
        }
    }
}
