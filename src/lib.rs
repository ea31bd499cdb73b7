//! fleetdash - a terminal status board for a waste-collection fleet.
//!
//! Each screen polls one HTTP endpoint on a fixed interval through a
//! [`poll::PollingSource`], decodes the body into a [`models::Snapshot`]
//! and renders it with a [`view::SnapshotView`].
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod headless;
pub mod logging;
pub mod models;
pub mod poll;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod view;
