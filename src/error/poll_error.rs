//! The error type produced by one fetch cycle.

use thiserror::Error;

use super::category::ErrorCategory;
use super::decode::DecodeError;
use super::transport::TransportError;

/// Everything that can go wrong in a single fetch.
///
/// A `PollError` never leaves the polling source: it is logged with the
/// source URL and swallowed, and the previous snapshot stays current.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl PollError {
    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            PollError::Transport(err) => err.http_status(),
            PollError::Decode(_) => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PollError::Transport(TransportError::Status { .. }) => ErrorCategory::Server,
            PollError::Transport(TransportError::InvalidUrl(_)) => ErrorCategory::Configuration,
            PollError::Transport(_) => ErrorCategory::Network,
            PollError::Decode(_) => ErrorCategory::Payload,
        }
    }

    /// Stable machine-readable code for log filtering.
    pub fn error_code(&self) -> &'static str {
        match self {
            PollError::Transport(err) => match err {
                TransportError::Connection(_) => "TRANSPORT_CONNECTION",
                TransportError::Timeout(_) => "TRANSPORT_TIMEOUT",
                TransportError::InvalidUrl(_) => "TRANSPORT_INVALID_URL",
                TransportError::Status { .. } => "TRANSPORT_STATUS",
                TransportError::Other(_) => "TRANSPORT_OTHER",
            },
            PollError::Decode(err) => match err {
                DecodeError::InvalidJson(_) => "DECODE_INVALID_JSON",
                DecodeError::NotAList { .. } => "DECODE_NOT_A_LIST",
                DecodeError::RecordNotObject { .. } => "DECODE_RECORD_NOT_OBJECT",
                DecodeError::MissingField { .. } => "DECODE_MISSING_FIELD",
                DecodeError::InvalidField { .. } => "DECODE_INVALID_FIELD",
                DecodeError::InvalidUtf8(_) => "DECODE_INVALID_UTF8",
            },
        }
    }
}
