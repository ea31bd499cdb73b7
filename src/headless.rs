//! `--once` mode: fetch each screen a single time and print it.

use color_eyre::Result;
use futures::future::join_all;
use std::io::Write;

use crate::config::DashConfig;
use crate::error::PollError;
use crate::poll::fetch_snapshot;
use crate::traits::HttpClient;
use crate::view::{plain::write_view, SnapshotView};

/// What a `--once` run printed.
#[derive(Debug, Default)]
pub struct OnceSummary {
    pub printed: usize,
    /// Screen id and error for every failed fetch.
    pub failures: Vec<(String, PollError)>,
}

impl OnceSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch every configured screen concurrently, then print them in order.
/// A failed screen prints its error in place of the view.
pub async fn run_once<W: Write>(
    config: &DashConfig,
    client: &dyn HttpClient,
    out: &mut W,
) -> Result<OnceSummary> {
    config.validate()?;
    let polls = config
        .screens
        .iter()
        .map(|screen| config.poll_config(screen))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let results = join_all(polls.iter().map(|poll| fetch_snapshot(client, poll))).await;

    let mut summary = OnceSummary::default();
    for ((screen, poll), result) in config.screens.iter().zip(&polls).zip(results) {
        writeln!(out, "== {} ({}) ==", screen.title, poll.url())?;
        match result {
            Ok(snapshot) => {
                write_view(out, &SnapshotView::new(poll.kind()).render(&snapshot))?;
                summary.printed += 1;
            }
            Err(error) => {
                tracing::warn!(
                    source = %screen.id,
                    url = poll.url(),
                    code = error.error_code(),
                    error = %error,
                    "Fetch failed"
                );
                writeln!(out, "error: {}", error)?;
                summary.failures.push((screen.id.clone(), error));
            }
        }
        writeln!(out)?;
    }
    Ok(summary)
}
