//! Transport-level failures: the request did not produce a usable 2xx body.

use thiserror::Error;

use crate::traits::HttpError;

/// Maximum number of body bytes kept in a [`TransportError::Status`].
const BODY_EXCERPT_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Build a `Status` error, keeping only a short excerpt of the body.
    pub fn status(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let trimmed = text.trim();
        let body = match trimmed.char_indices().nth(BODY_EXCERPT_LIMIT) {
            Some((idx, _)) => format!("{}...", &trimmed[..idx]),
            None => trimmed.to_string(),
        };
        TransportError::Status { status, body }
    }

    /// HTTP status, if the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(msg) => TransportError::Connection(msg),
            HttpError::Timeout(msg) => TransportError::Timeout(msg),
            HttpError::InvalidUrl(msg) => TransportError::InvalidUrl(msg),
            HttpError::Other(msg) => TransportError::Other(msg),
        }
    }
}
