//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use fleetdash::poll::PollEvent;
use std::time::Duration;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://fleet";
pub const TRUCKS_URL: &str = "http://fleet/trucks.json";
pub const DUMPSTERS_URL: &str = "http://fleet/dumpsters.json";
pub const MAP_URL: &str = "http://fleet/map.txt";

/// Long enough that only the immediate first tick fires during a test.
pub const NEVER: Duration = Duration::from_secs(3600);

pub const TRUCKS_JSON: &str = r#"[
    {"name": "T1", "location": {"x": 1, "y": 2}, "status": "BUSY", "fuel_level": 50, "trash_level": 10},
    {"name": "T2", "location": {"x": 4, "y": 0}, "status": {"__enum__": "TruckState.IDLE"}, "fuel_level": 80, "trash_level": 0}
]"#;

pub const DUMPSTERS_JSON: &str = r#"[
    {"name": "D1", "location": {"x": 3, "y": 4}, "value": 7},
    {"name": "D2", "location": "Depot", "trash_level": 2}
]"#;

pub const MAP_TXT: &str = "#####\n#T D#\n#@*-#\n#####\n";

/// Wait up to two seconds for the next poll event.
pub async fn next_event(rx: &mut mpsc::UnboundedReceiver<PollEvent>) -> PollEvent {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for poll event")
        .expect("event channel closed")
}

/// Poll `condition` every few milliseconds for up to two seconds.
pub async fn wait_until<F: Fn() -> bool>(condition: F) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 2s"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
