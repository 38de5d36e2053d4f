//! Bottom status bar: panel hints, current selection, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Panel hints
    spans.push(Span::styled(
        " 1:Portfolio 2:Allocation 3:Help e:errors q:quit",
        theme::muted(),
    ));

    // Separator
    spans.push(Span::raw(" | "));

    match app.selection.selected() {
        Some(id) => spans.push(Span::styled(format!("▶ {id}"), theme::accent_bold())),
        None => spans.push(Span::styled("no selection", theme::muted())),
    }

    if !app.error_history.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} errors", app.error_history.len()),
            theme::warning(),
        ));
    }

    // Status message
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
