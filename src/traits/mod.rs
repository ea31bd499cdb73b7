//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - the fetch primitive every polling source goes through

pub mod http;

pub use http::{HttpClient, HttpError, Response};
