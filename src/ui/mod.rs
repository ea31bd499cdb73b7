//! Terminal rendering.
//!
//! Layout, top to bottom: a tab bar with one tab per screen, the active
//! screen's view, and a one-line footer with the screen's URL, poll
//! interval and last update time.

mod helpers;
mod table;
mod text_map;
mod theme;

pub use helpers::{format_interval, truncate_to_width};
pub use table::row_alerts;
pub use text_map::{glyph_style, tint_line};
pub use theme::*;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Screen};
use crate::view::View;

const KEY_HINTS: &str = "tab switch · r refresh · q quit";

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(1),    // Active screen
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], app);

    let Some(screen) = app.active_screen() else {
        let empty = Paragraph::new(Line::styled("No screens", Style::default().fg(COLOR_DIM)));
        frame.render_widget(empty, chunks[1]);
        return;
    };

    match screen.view() {
        View::Table(view) => {
            table::render_table(frame, chunks[1], view, screen.alert(), screen.scroll)
        }
        View::Text { content } => text_map::render_text(frame, chunks[1], content, screen.scroll),
    }
    render_footer(frame, chunks[2], screen);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app
        .screens
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active)
        .style(Style::default().fg(COLOR_DIM))
        .highlight_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" fleetdash "),
        );
    frame.render_widget(tabs, area);
}

/// Footer text for `screen`, split into URL/interval and status parts.
pub fn footer_parts(screen: &Screen) -> (String, String) {
    let location = format!(
        "GET {} every {}",
        screen.url(),
        format_interval(screen.interval())
    );
    let status = match screen.last_updated() {
        Some(at) => format!("updated {}", at.format("%H:%M:%S")),
        None => "waiting for data".to_string(),
    };
    (location, status)
}

fn render_footer(frame: &mut Frame, area: Rect, screen: &Screen) {
    let (location, status) = footer_parts(screen);
    let status_style = if screen.last_updated().is_some() {
        Style::default().fg(COLOR_FRESH)
    } else {
        Style::default().fg(COLOR_DIM)
    };

    let fixed = status.chars().count() + KEY_HINTS.chars().count() + 6;
    let location = truncate_to_width(&location, (area.width as usize).saturating_sub(fixed));

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(location, Style::default().fg(COLOR_DIM)),
        Span::raw(" · "),
        Span::styled(status, status_style),
        Span::raw(" · "),
        Span::styled(KEY_HINTS, Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
