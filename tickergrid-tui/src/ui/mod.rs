//! Top-level UI layout: three-panel frame with status bar.

pub mod allocation_panel;
pub mod chart_panel;
pub mod grid_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let (main_area, status_area) = split_status(f.area());

    // Draw the active panel.
    draw_panel(f, main_area, app);

    // Draw status bar.
    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Filter => overlays::render_filter(f, main_area, &app.filter_input),
        Overlay::None => {}
    }
}

/// Split the frame into main area + 1-line status bar.
fn split_status(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn panel_block(panel: Panel) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true))
}

/// Grid on top, detail chart below.
fn split_portfolio(inner: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);
    (chunks[0], chunks[1])
}

/// Grid body rows that fit in a frame of this size.
pub fn grid_viewport(frame_area: Rect) -> usize {
    let (main_area, _) = split_status(frame_area);
    let inner = panel_block(Panel::Portfolio).inner(main_area);
    let (grid_area, _) = split_portfolio(inner);
    grid_panel::body_height(grid_area)
}

/// Draw a single panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;
    let block = panel_block(panel);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Portfolio => {
            let (grid_area, chart_area) = split_portfolio(inner);
            grid_panel::render(f, grid_area, app);
            chart_panel::render(f, chart_area, app);
        }
        Panel::Allocation => allocation_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert!(popup.x >= area.x && popup.right() <= area.right());
    }

    #[test]
    fn viewport_grows_with_terminal() {
        let small = grid_viewport(Rect::new(0, 0, 120, 20));
        let large = grid_viewport(Rect::new(0, 0, 120, 60));
        assert!(large > small);
    }

    #[test]
    fn tiny_terminal_has_no_body_rows() {
        assert_eq!(grid_viewport(Rect::new(0, 0, 10, 3)), 0);
    }
}
