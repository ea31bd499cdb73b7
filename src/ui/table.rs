//! Table screens.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::config::AlertRule;
use crate::view::TableView;

use super::theme::{COLOR_ACCENT, COLOR_ALERT, COLOR_BORDER, COLOR_BUSY, COLOR_DIM, COLOR_IDLE};

const STATUS_KEY: &str = "status";

fn status_style(status: &str) -> Style {
    match status {
        "BUSY" => Style::default().fg(COLOR_BUSY),
        "IDLE" => Style::default().fg(COLOR_IDLE),
        _ => Style::default(),
    }
}

/// Whether row `index` trips `rule`. Non-numeric or blank cells never do.
pub fn row_alerts(table: &TableView, index: usize, rule: &AlertRule) -> bool {
    table
        .cell(index, &rule.key)
        .and_then(|cell| cell.parse::<f64>().ok())
        .is_some_and(|level| level > rule.above)
}

fn column_widths(table: &TableView) -> Vec<Constraint> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.width()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }
    let last = widths.len().saturating_sub(1);
    widths
        .into_iter()
        .enumerate()
        .map(|(i, w)| {
            if i == last {
                Constraint::Min(w as u16)
            } else {
                Constraint::Length(w as u16)
            }
        })
        .collect()
}

pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    table: &TableView,
    alert: Option<&AlertRule>,
    scroll: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));

    if table.rows.is_empty() {
        let header = Line::styled(table.headers.join("  "), Style::default().fg(COLOR_DIM));
        let empty = Paragraph::new(vec![
            header,
            Line::raw(""),
            Line::styled("No records", Style::default().fg(COLOR_DIM)),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let status_column = table.column_index(STATUS_KEY);
    let header = Row::new(table.headers.iter().map(|h| Cell::from(h.as_str())))
        .style(Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows = table
        .rows
        .iter()
        .enumerate()
        .skip(scroll)
        .map(|(index, cells)| {
            let row = Row::new(cells.iter().enumerate().map(|(column, cell)| {
                if Some(column) == status_column {
                    Cell::from(cell.as_str()).style(status_style(cell))
                } else {
                    Cell::from(cell.as_str())
                }
            }));
            match alert {
                Some(rule) if row_alerts(table, index, rule) => row.style(
                    Style::default()
                        .fg(COLOR_ALERT)
                        .add_modifier(Modifier::BOLD),
                ),
                _ => row,
            }
        });

    let widget = Table::new(rows, column_widths(table))
        .header(header)
        .column_spacing(2)
        .block(block);
    frame.render_widget(widget, area);
}
