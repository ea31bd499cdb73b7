//! Tab and scroll navigation.

use super::App;

impl App {
    pub fn next_screen(&mut self) {
        if !self.screens.is_empty() {
            self.active = (self.active + 1) % self.screens.len();
            self.needs_redraw = true;
        }
    }

    pub fn prev_screen(&mut self) {
        if !self.screens.is_empty() {
            self.active = (self.active + self.screens.len() - 1) % self.screens.len();
            self.needs_redraw = true;
        }
    }

    /// Select by zero-based index; out of range is ignored.
    pub fn select_screen(&mut self, index: usize) {
        if index < self.screens.len() && index != self.active {
            self.active = index;
            self.needs_redraw = true;
        }
    }

    pub fn scroll(&mut self, delta: isize) {
        if let Some(screen) = self.active_screen_mut() {
            let before = screen.scroll;
            screen.scroll_by(delta);
            if screen.scroll != before {
                self.needs_redraw = true;
            }
        }
    }

    /// Fetch the active screen now, outside its timer.
    pub fn refresh_active(&mut self) {
        if let Some(screen) = self.active_screen() {
            tracing::debug!(screen = screen.id(), "Manual refresh");
            screen.fetch_now();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
