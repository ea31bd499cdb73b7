//! The polling source: fetch, decode, replace, repeat.
//!
//! A [`PollingSource`] owns one endpoint's current [`Snapshot`]. It fetches
//! immediately on start and then on every tick of a fixed interval.
//! Fetches are fire-and-forget tasks; they may overlap, and whichever
//! completes last wins (last-write-wins by arrival, not by issue order).
//!
//! # Cancellation
//!
//! Every fetch is tagged with the generation that was live when it was
//! issued. [`PollingSource::stop`] bumps the generation under the same
//! lock that guards applying a result, so once `stop` returns no fetch,
//! however late, can replace the snapshot.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::config::PollConfig;
use super::decode::decode;
use super::events::PollEvent;
use crate::error::{PollError, PollResult, TransportError};
use crate::models::Snapshot;
use crate::traits::HttpClient;

/// Fetch `config.url` once and decode it per `config.kind()`.
///
/// Non-2xx responses are transport errors; bodies that do not match the
/// declared kind or schema are decode errors.
pub async fn fetch_snapshot(client: &dyn HttpClient, config: &PollConfig) -> PollResult<Snapshot> {
    let response = client
        .get(config.url())
        .await
        .map_err(TransportError::from)?;

    if !response.is_success() {
        return Err(TransportError::status(response.status, &response.body).into());
    }

    Ok(decode(&response.body, config.kind())?)
}

#[derive(Debug)]
struct Generation {
    live: u64,
    stopped: bool,
}

struct Shared {
    config: PollConfig,
    client: Arc<dyn HttpClient>,
    snapshot: watch::Sender<Arc<Snapshot>>,
    generation: Mutex<Generation>,
    events: Option<mpsc::UnboundedSender<PollEvent>>,
}

impl Shared {
    fn generation(&self) -> MutexGuard<'_, Generation> {
        // A poisoned lock only means another fetch task panicked mid-apply;
        // the generation itself is still consistent.
        self.generation.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn live_generation(&self) -> Option<u64> {
        let generation = self.generation();
        (!generation.stopped).then_some(generation.live)
    }

    async fn run_fetch(&self, generation: u64) {
        let source = self.config.label();
        tracing::debug!(source, url = self.config.url(), generation, "Fetching snapshot");

        match fetch_snapshot(self.client.as_ref(), &self.config).await {
            Ok(snapshot) => {
                if self.apply(generation, snapshot) {
                    tracing::debug!(source, generation, "Snapshot replaced");
                    self.emit(PollEvent::SnapshotReplaced {
                        source: source.to_string(),
                    });
                } else {
                    tracing::debug!(source, generation, "Discarding result for stopped source");
                }
            }
            Err(error) => self.report(generation, error),
        }
    }

    /// Replace the snapshot if `generation` is still live.
    fn apply(&self, generation: u64, snapshot: Snapshot) -> bool {
        let guard = self.generation();
        if guard.stopped || guard.live != generation {
            return false;
        }
        self.snapshot.send_replace(Arc::new(snapshot));
        true
    }

    fn report(&self, generation: u64, error: PollError) {
        if self.live_generation() != Some(generation) {
            tracing::debug!(
                source = self.config.label(),
                error = %error,
                "Ignoring failure for stopped source"
            );
            return;
        }

        tracing::warn!(
            source = self.config.label(),
            url = self.config.url(),
            status = error.status(),
            code = error.error_code(),
            category = %error.category(),
            transient = error.category().is_transient(),
            error = %error,
            "Fetch failed, keeping previous snapshot"
        );
        self.emit(PollEvent::FetchFailed {
            source: self.config.label().to_string(),
            error,
        });
    }

    fn emit(&self, event: PollEvent) {
        if let Some(tx) = &self.events {
            // Receiver gone means the app is shutting down.
            let _ = tx.send(event);
        }
    }
}

/// One screen's polling state. The value returned by [`start`] is the
/// handle: stop it (or drop it) to end polling.
///
/// [`start`]: PollingSource::start
pub struct PollingSource {
    shared: Arc<Shared>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl PollingSource {
    /// Start polling `config.url` every `config.interval`.
    ///
    /// The snapshot starts empty for the declared kind. The first fetch is
    /// issued immediately; nothing here waits on the network.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: PollConfig, client: Arc<dyn HttpClient>) -> Self {
        Self::spawn(config, client, None)
    }

    /// Like [`start`](Self::start), additionally sending a [`PollEvent`]
    /// for every replaced snapshot and every swallowed failure.
    pub fn start_with_events(
        config: PollConfig,
        client: Arc<dyn HttpClient>,
        events: mpsc::UnboundedSender<PollEvent>,
    ) -> Self {
        Self::spawn(config, client, Some(events))
    }

    fn spawn(
        config: PollConfig,
        client: Arc<dyn HttpClient>,
        events: Option<mpsc::UnboundedSender<PollEvent>>,
    ) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::empty_for(config.kind())));
        let interval = config.interval();

        tracing::info!(
            source = config.label(),
            url = config.url(),
            kind = config.kind().as_str(),
            interval_ms = interval.as_millis() as u64,
            "Polling source started"
        );

        let shared = Arc::new(Shared {
            config,
            client,
            snapshot,
            generation: Mutex::new(Generation {
                live: 0,
                stopped: false,
            }),
            events,
        });

        let timer_shared = Arc::clone(&shared);
        let timer = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // First tick completes immediately: that is the initial fetch.
                ticker.tick().await;

                let Some(generation) = timer_shared.live_generation() else {
                    break;
                };
                let fetch_shared = Arc::clone(&timer_shared);
                tokio::spawn(async move { fetch_shared.run_fetch(generation).await });
            }
        });

        Self {
            shared,
            timer: Mutex::new(Some(timer)),
        }
    }

    /// Issue one fetch now, independent of the timer.
    ///
    /// Returns the fetch task's handle; awaiting it is optional. On a
    /// stopped source this does nothing.
    pub fn fetch_once(&self) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            if let Some(generation) = shared.live_generation() {
                shared.run_fetch(generation).await;
            }
        })
    }

    /// The latest stored snapshot. Never waits on the network.
    pub fn current_snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.shared.snapshot.borrow())
    }

    /// Receiver that observes every snapshot replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.shared.snapshot.subscribe()
    }

    pub fn config(&self) -> &PollConfig {
        &self.shared.config
    }

    pub fn is_running(&self) -> bool {
        self.shared.live_generation().is_some()
    }

    /// Cancel the timer and invalidate all in-flight fetches. Idempotent.
    pub fn stop(&self) {
        {
            let mut generation = self.shared.generation();
            if generation.stopped {
                return;
            }
            generation.stopped = true;
            generation.live = generation.live.wrapping_add(1);
        }

        let timer = self
            .timer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(timer) = timer {
            timer.abort();
        }

        tracing::info!(source = self.shared.config.label(), "Polling source stopped");
    }
}

impl Drop for PollingSource {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PollingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingSource")
            .field("config", &self.shared.config)
            .field("running", &self.is_running())
            .finish()
    }
}
