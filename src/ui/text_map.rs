//! Text screens. The map blob is shown verbatim with its glyphs tinted.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_BORDER, COLOR_MAP_DUMPSTER, COLOR_MAP_PATH, COLOR_MAP_ROAD, COLOR_MAP_TRUCK,
    COLOR_MAP_WALL,
};

pub fn glyph_style(c: char) -> Style {
    match c {
        'T' => Style::default()
            .fg(COLOR_MAP_TRUCK)
            .add_modifier(Modifier::BOLD),
        'D' => Style::default()
            .fg(COLOR_MAP_DUMPSTER)
            .add_modifier(Modifier::BOLD),
        '#' => Style::default().fg(COLOR_MAP_WALL),
        '@' | '*' => Style::default().fg(COLOR_MAP_PATH),
        '-' => Style::default().fg(COLOR_MAP_ROAD),
        _ => Style::default(),
    }
}

/// Split one line into spans of equally styled characters.
pub fn tint_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();

    for c in line.chars() {
        let style = glyph_style(c);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

pub fn render_text(frame: &mut Frame, area: Rect, content: &str, scroll: usize) {
    let lines: Vec<Line> = content.lines().map(tint_line).collect();
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    let widget = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER)),
    );
    frame.render_widget(widget, area);
}
