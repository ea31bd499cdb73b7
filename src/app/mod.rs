//! Application state for the dashboard.
//!
//! One [`Screen`] per configured mount point, each owning its
//! [`PollingSource`](crate::poll::PollingSource). Sources report on a
//! shared event channel; the main loop feeds those events to
//! [`App::handle_poll_event`] and redraws when [`App::needs_redraw`] is set.

mod handlers;
mod navigation;
mod screen;

pub use screen::Screen;

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::{ConfigError, DashConfig};
use crate::poll::PollEvent;
use crate::traits::HttpClient;

pub struct App {
    pub screens: Vec<Screen>,
    /// Index into `screens` of the visible tab.
    pub active: usize,
    pub should_quit: bool,
    pub needs_redraw: bool,
    events_rx: Option<mpsc::UnboundedReceiver<PollEvent>>,
}

impl App {
    /// Mount every configured screen and start polling.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &DashConfig, client: Arc<dyn HttpClient>) -> Result<Self, ConfigError> {
        config.validate()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut screens = Vec::with_capacity(config.screens.len());
        for screen in &config.screens {
            let poll = config.poll_config(screen)?;
            screens.push(Screen::mount(
                screen.clone(),
                poll,
                Arc::clone(&client),
                events_tx.clone(),
            ));
        }

        tracing::info!(screens = screens.len(), "Dashboard started");
        Ok(Self {
            screens,
            active: 0,
            should_quit: false,
            needs_redraw: true,
            events_rx: Some(events_rx),
        })
    }

    pub fn active_screen(&self) -> Option<&Screen> {
        self.screens.get(self.active)
    }

    pub fn active_screen_mut(&mut self) -> Option<&mut Screen> {
        self.screens.get_mut(self.active)
    }

    pub fn screen_mut(&mut self, id: &str) -> Option<&mut Screen> {
        self.screens.iter_mut().find(|s| s.id() == id)
    }

    /// Hand the poll event receiver to an event loop that selects over it
    /// alongside other inputs.
    pub fn take_poll_events(&mut self) -> Option<mpsc::UnboundedReceiver<PollEvent>> {
        self.events_rx.take()
    }

    /// Wait for the next poll event. `None` once every source has stopped
    /// or the receiver was taken.
    pub async fn next_poll_event(&mut self) -> Option<PollEvent> {
        match self.events_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    pub fn handle_poll_event(&mut self, event: PollEvent) {
        match event {
            PollEvent::SnapshotReplaced { source } => {
                let Some(screen) = self.screen_mut(&source) else {
                    return;
                };
                screen.refresh();
                self.needs_redraw = true;
            }
            PollEvent::FetchFailed { source, error } => {
                // The source already logged it; the screen keeps its last view.
                tracing::trace!(source = %source, code = error.error_code(), "Fetch failure observed");
            }
        }
    }

    /// Stop every source. After this returns no snapshot changes.
    pub fn shutdown(&mut self) {
        for screen in &self.screens {
            screen.stop();
        }
        tracing::info!("Dashboard stopped");
    }
}
