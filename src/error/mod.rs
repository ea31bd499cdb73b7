//! Error types for the polling pipeline.
//!
//! | Type | Raised when | Category |
//! |------|-------------|----------|
//! | [`TransportError`] | connection, timeout, bad URL, non-2xx | Network / Server / Configuration |
//! | [`DecodeError`] | body does not match payload kind or schema | Payload |
//!
//! Both are folded into [`PollError`], which the polling source logs and
//! swallows. Nothing in this module ever reaches the view layer.

mod category;
mod decode;
mod poll_error;
mod transport;

pub(crate) use decode::json_type_name;

pub use category::ErrorCategory;
pub use decode::DecodeError;
pub use poll_error::PollError;
pub use transport::TransportError;

/// Result of a single fetch cycle.
pub type PollResult<T> = Result<T, PollError>;
