//! Command-line interface.
//!
//! Flags are parsed with [`build_cli`] and layered over the loaded
//! [`DashConfig`](crate::config::DashConfig) by [`Args::apply`].

pub mod args;

pub use args::{build_cli, Args};
