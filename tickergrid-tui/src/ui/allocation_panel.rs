//! Allocation view: one bar per holding, sized by average price.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use tickergrid_core::{format_currency, ALLOCATION_TITLE};

use crate::app::AppState;
use crate::theme;

/// Columns taken by everything except the bar.
const FIXED_WIDTH: u16 = 2 + 9 + 8 + 16;

fn bar(share: f64, width: usize) -> String {
    let filled = (share.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{:<width$}", "█".repeat(filled))
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let alloc = &app.allocation;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(ALLOCATION_TITLE, theme::accent_bold()),
        Span::styled(
            format!("  {} holdings, weighted by average price", alloc.slices.len()),
            theme::muted(),
        ),
        Span::styled("  [j/k]move [Enter]select in grid", theme::muted()),
    ]));
    lines.push(Line::from(""));

    if alloc.slices.is_empty() {
        lines.push(Line::from(Span::styled(
            "No valid rows to allocate.",
            theme::muted(),
        )));
    } else {
        let bar_width = area.width.saturating_sub(FIXED_WIDTH).max(1) as usize;
        let visible_height = area.height.saturating_sub(2) as usize;
        let start = alloc.cursor.saturating_sub(visible_height.saturating_sub(1));
        let end = (start + visible_height).min(alloc.slices.len());

        for i in start..end {
            let slice = &alloc.slices[i];
            let is_cursor = i == alloc.cursor;
            let is_selected = app.selection.is_selected(&slice.ticker);

            let label_style = if is_cursor {
                theme::accent().add_modifier(Modifier::REVERSED)
            } else if is_selected {
                theme::accent_bold()
            } else {
                theme::text()
            };
            let marker = if is_selected { "▶ " } else { "  " };

            lines.push(Line::from(vec![
                Span::styled(marker, theme::accent_bold()),
                Span::styled(format!("{:<8} ", slice.ticker), label_style),
                Span::styled(bar(slice.share, bar_width), theme::hint_fg(slice.hint)),
                Span::styled(format!(" {:>6.1}%", slice.share * 100.0), theme::muted()),
                Span::styled(
                    format!(" {:>15}", format_currency(slice.profit_and_loss)),
                    theme::hint_style(slice.hint),
                ),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}
