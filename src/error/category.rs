//! Error category classification.

use std::fmt;

/// High-level categorization of poll failures, used as logging fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout. Transient.
    Network,

    /// The server answered with a non-2xx status.
    Server,

    /// The payload did not match the declared kind or schema.
    Payload,

    /// The request could not be built (bad URL).
    Configuration,
}

impl ErrorCategory {
    /// Returns true if the next timer tick can reasonably succeed without
    /// anyone changing anything.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Payload => "payload",
            ErrorCategory::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
