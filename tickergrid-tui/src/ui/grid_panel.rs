//! Portfolio grid: one line per row, columns from the shared schema.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use tickergrid_core::{format_currency, style_hint, Cell, ColumnId, Row, COLUMNS};

use crate::app::AppState;
use crate::theme;

/// Summary line and column header above the body.
const HEADER_LINES: u16 = 2;

/// Width of the selection marker column.
const MARKER_WIDTH: usize = 2;

pub fn body_height(area: Rect) -> usize {
    area.height.saturating_sub(HEADER_LINES) as usize
}

fn column_width(id: ColumnId, sparkline_width: usize) -> usize {
    match id {
        ColumnId::Ticker => 8,
        ColumnId::Shares => 10,
        ColumnId::AveragePrice | ColumnId::CurrentPrice => 14,
        ColumnId::SimplePriceHistory => sparkline_width.max(8),
        ColumnId::ProfitAndLoss => 16,
    }
}

/// Fit text to a column. Numeric columns are right-aligned.
fn pad(text: &str, width: usize, right: bool) -> String {
    let clipped: String = if text.chars().count() > width {
        let mut s: String = text.chars().take(width.saturating_sub(1)).collect();
        s.push('…');
        s
    } else {
        text.to_string()
    };
    if right {
        format!("{clipped:>width$} ")
    } else {
        format!("{clipped:<width$} ")
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let grid = &app.grid;
    let spark_width = app.options.sparkline_width;
    let mut lines: Vec<Line> = Vec::new();

    // Summary
    let total = app.model.total_profit_and_loss();
    let mut summary = vec![
        Span::styled(
            format!("{} of {} rows", grid.visible.len(), app.model.len()),
            theme::accent(),
        ),
        Span::styled(" | Total P&L ", theme::muted()),
        Span::styled(format_currency(total), theme::hint_style(style_hint(total))),
    ];
    if !app.filters.is_empty() {
        summary.push(Span::styled(format!(" | filter: {}", app.filters), theme::warning()));
    }
    summary.push(Span::styled(
        "  [j/k]move [Enter]select [Esc]clear [/]filter",
        theme::muted(),
    ));
    lines.push(Line::from(summary));

    // Column headers
    let mut header = vec![Span::raw(" ".repeat(MARKER_WIDTH))];
    for col in COLUMNS.iter() {
        header.push(Span::styled(
            pad(col.header, column_width(col.id, spark_width), col.is_numeric()),
            theme::accent_bold(),
        ));
    }
    lines.push(Line::from(header));

    if grid.visible.is_empty() {
        lines.push(Line::from(""));
        let msg = if app.model.is_empty() {
            "No rows loaded."
        } else {
            "No rows match the current filter. Press x to clear it."
        };
        lines.push(Line::from(Span::styled(msg, theme::muted())));
    } else {
        let start = grid.scroll_offset;
        let end = (start + body_height(area)).min(grid.visible.len());
        for pos in start..end {
            let row = &app.model.rows()[grid.visible[pos]];
            lines.push(row_line(app, row, pos == grid.cursor));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn row_line<'a>(app: &AppState, row: &Row, is_cursor: bool) -> Line<'a> {
    let spark_width = app.options.sparkline_width;
    let is_selected = app.selection.is_selected(row.id.as_str());
    let malformed = row.malformed().is_some();

    let marker = if is_selected { "▶ " } else { "  " };
    let mut spans = vec![Span::styled(marker, theme::accent_bold())];

    for cell in row.cells(&app.options) {
        let def = cell.column.def();
        let text = pad(&cell.text, column_width(cell.column, spark_width), def.is_numeric());
        let style = if is_cursor {
            theme::cursor_row()
        } else {
            cell_style(&cell, malformed, is_selected)
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

fn cell_style(cell: &Cell, malformed: bool, is_selected: bool) -> Style {
    if let Some(hint) = cell.style {
        return theme::hint_style(hint);
    }
    match cell.column {
        ColumnId::Ticker if malformed => theme::warning(),
        ColumnId::Ticker if is_selected => theme::accent_bold(),
        ColumnId::Ticker => theme::text(),
        ColumnId::SimplePriceHistory => theme::neutral(),
        _ if malformed => theme::muted(),
        _ => theme::text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_aligns() {
        assert_eq!(pad("AB", 4, false), "AB   ");
        assert_eq!(pad("$1.00", 7, true), "  $1.00 ");
    }

    #[test]
    fn pad_clips_long_text() {
        assert_eq!(pad("ABCDEFGHIJ", 5, false), "ABCD… ");
    }

    #[test]
    fn body_height_leaves_room_for_header() {
        assert_eq!(body_height(Rect::new(0, 0, 80, 12)), 10);
        assert_eq!(body_height(Rect::new(0, 0, 80, 1)), 0);
    }
}
