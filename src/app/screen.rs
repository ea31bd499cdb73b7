use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::{AlertRule, ScreenConfig};
use crate::poll::{PollConfig, PollEvent, PollingSource};
use crate::traits::HttpClient;
use crate::view::{SnapshotView, View};

/// A mounted screen: its polling source and the latest rendered view.
pub struct Screen {
    config: ScreenConfig,
    renderer: SnapshotView,
    view: View,
    source: PollingSource,
    last_updated: Option<DateTime<Local>>,
    /// First visible row or line.
    pub scroll: usize,
}

impl Screen {
    pub fn mount(
        config: ScreenConfig,
        poll: PollConfig,
        client: Arc<dyn HttpClient>,
        events: mpsc::UnboundedSender<PollEvent>,
    ) -> Self {
        let renderer = SnapshotView::new(poll.kind());
        let source = PollingSource::start_with_events(poll, client, events);
        let view = renderer.render(&source.current_snapshot());
        Self {
            config,
            renderer,
            view,
            source,
            last_updated: None,
            scroll: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn url(&self) -> &str {
        self.source.config().url()
    }

    pub fn interval(&self) -> std::time::Duration {
        self.source.config().interval()
    }

    pub fn alert(&self) -> Option<&AlertRule> {
        self.config.kind.alert()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn source(&self) -> &PollingSource {
        &self.source
    }

    /// Re-render from the source's current snapshot.
    pub fn refresh(&mut self) {
        self.view = self.renderer.render(&self.source.current_snapshot());
        self.last_updated = Some(Local::now());
        self.clamp_scroll();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = self.view.line_count().saturating_sub(1);
        self.scroll = self.scroll.min(max);
    }

    pub fn fetch_now(&self) {
        // Fire and forget; the result arrives as a PollEvent.
        drop(self.source.fetch_once());
    }

    pub fn stop(&self) {
        self.source.stop();
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("id", &self.config.id)
            .field("url", &self.url())
            .field("scroll", &self.scroll)
            .field("last_updated", &self.last_updated)
            .finish()
    }
}
