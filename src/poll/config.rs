//! Immutable polling parameters.

use std::time::Duration;
use thiserror::Error;

use crate::models::{PayloadKind, RecordSchema};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollConfigError {
    #[error("poll URL must not be empty")]
    EmptyUrl,

    #[error("poll interval must be greater than zero")]
    ZeroInterval,
}

/// Where to poll, how often, and what comes back.
///
/// Fixed for the lifetime of a [`PollingSource`](super::PollingSource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    url: String,
    interval: Duration,
    kind: PayloadKind,
    label: Option<String>,
}

impl PollConfig {
    pub fn new(
        url: impl Into<String>,
        interval: Duration,
        kind: PayloadKind,
    ) -> Result<Self, PollConfigError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(PollConfigError::EmptyUrl);
        }
        if interval.is_zero() {
            return Err(PollConfigError::ZeroInterval);
        }
        Ok(Self {
            url,
            interval,
            kind,
            label: None,
        })
    }

    /// Config for a JSON list endpoint.
    pub fn list(
        url: impl Into<String>,
        interval: Duration,
        schema: RecordSchema,
    ) -> Result<Self, PollConfigError> {
        Self::new(url, interval, PayloadKind::list(schema))
    }

    /// Config for a plain-text endpoint.
    pub fn text(url: impl Into<String>, interval: Duration) -> Result<Self, PollConfigError> {
        Self::new(url, interval, PayloadKind::Text)
    }

    /// Name used to tag events and log lines. Defaults to the URL.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn kind(&self) -> &PayloadKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.url)
    }
}
