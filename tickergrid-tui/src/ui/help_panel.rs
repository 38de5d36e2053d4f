//! Help panel: keyboard shortcuts and filter syntax.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use tickergrid_core::COLUMNS;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-3", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "/", "Edit column filters");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "r", "Reload the data file");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Portfolio");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "g / G", "Jump to first / last row");
    key(&mut lines, "PgUp / PgDn", "Scroll a page");
    key(&mut lines, "Enter / Space", "Select row and chart its price history");
    key(&mut lines, "Esc", "Clear selection");
    key(&mut lines, "x", "Clear filters");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Allocation");
    key(&mut lines, "j / k", "Move between holdings");
    key(&mut lines, "Enter", "Select the holding in the grid");
    lines.push(Line::from(""));

    section(&mut lines, "Filters");
    key(&mut lines, "field~text", "Contains, case-insensitive");
    key(&mut lines, "field=value", "Equals (text or number)");
    key(&mut lines, "field>n  >=  <  <=", "Numeric comparison");
    let fields: Vec<&str> = COLUMNS.iter().map(|c| c.id.field()).collect();
    key(&mut lines, "fields", &fields.join(", "));
    key(&mut lines, "example", "ticker~a PnL>0");
    lines.push(Line::from(""));

    section(&mut lines, "Data");
    key(&mut lines, "source", &app.source_label);

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line>, key: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {key:<20}"), theme::neutral()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
