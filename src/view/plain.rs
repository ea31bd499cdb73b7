//! Plain-text output for headless runs.

use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use super::{TableView, View};

const COLUMN_GAP: &str = "  ";

/// Write `view` as aligned columns or verbatim text.
pub fn write_view<W: Write>(out: &mut W, view: &View) -> io::Result<()> {
    match view {
        View::Table(table) => write_table(out, table),
        View::Text { content } => {
            out.write_all(content.as_bytes())?;
            if !content.is_empty() && !content.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

pub fn view_to_string(view: &View) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = write_view(&mut buf, view);
    String::from_utf8_lossy(&buf).into_owned()
}

fn column_widths(table: &TableView) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.width()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }
    widths
}

fn write_line<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        line.extend(std::iter::repeat(' ').take(width.saturating_sub(cell.width())));
    }
    writeln!(out, "{}", line.trim_end())
}

fn write_table<W: Write>(out: &mut W, table: &TableView) -> io::Result<()> {
    let widths = column_widths(table);
    write_line(out, &table.headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(out, &rule, &widths)?;
    for row in &table.rows {
        write_line(out, row, &widths)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<&str>>) -> View {
        View::Table(TableView {
            headers: vec!["Name".into(), "Location".into(), "Value".into()],
            keys: vec!["name".into(), "location".into(), "trash_level".into()],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        })
    }

    #[test]
    fn test_table_alignment() {
        let out = view_to_string(&table(vec![
            vec!["D1", "3, 4", "7"],
            vec!["Dumpster Twelve", "Yard", "2"],
        ]));
        let expected = "\
Name             Location  Value
---------------  --------  -----
D1               3, 4      7
Dumpster Twelve  Yard      2
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_table_prints_headers() {
        let out = view_to_string(&table(Vec::new()));
        assert_eq!(out, "Name  Location  Value\n----  --------  -----\n");
    }

    #[test]
    fn test_wide_glyphs_align() {
        let out = view_to_string(&table(vec![vec!["車", "1, 1", "5"]]));
        assert_eq!(out.lines().nth(2), Some("車    1, 1      5"));
    }

    #[test]
    fn test_text_gets_trailing_newline() {
        let view = View::Text {
            content: "A\nB".to_string(),
        };
        assert_eq!(view_to_string(&view), "A\nB\n");

        let empty = View::Text {
            content: String::new(),
        };
        assert_eq!(view_to_string(&empty), "");
    }
}
