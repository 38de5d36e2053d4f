//! Keyboard input dispatch: overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event. Clears `app.running` on quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Filter => {
            handle_filter_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Portfolio; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Allocation; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('/') => {
            app.filter_input = app.filters.to_string();
            app.overlay = Overlay::Filter;
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Portfolio => handle_portfolio_key(app, key),
        Panel::Allocation => handle_allocation_key(app, key),
        Panel::Help => {} // display only
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_filter_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.filter_input.clear();
        }
        KeyCode::Enter => {
            let text = std::mem::take(&mut app.filter_input);
            app.overlay = Overlay::None;
            app.apply_filter_text(&text);
        }
        KeyCode::Backspace => {
            app.filter_input.pop();
        }
        KeyCode::Char(c) => {
            app.filter_input.push(c);
        }
        _ => {}
    }
}

fn handle_portfolio_key(app: &mut AppState, key: KeyEvent) {
    let page = app.grid.viewport.max(1) as isize;

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.grid.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.grid.move_cursor(-1),
        KeyCode::PageDown => app.grid.move_cursor(page),
        KeyCode::PageUp => app.grid.move_cursor(-page),
        KeyCode::Char('g') | KeyCode::Home => app.grid.move_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.grid.move_to_bottom(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_cursor_row(),
        KeyCode::Esc => app.clear_selection(),
        KeyCode::Char('x') => app.apply_filter_text(""),
        _ => {}
    }
}

fn handle_allocation_key(app: &mut AppState, key: KeyEvent) {
    let count = app.allocation.slices.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.allocation.cursor + 1 < count {
                app.allocation.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.allocation.cursor = app.allocation.cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.select_allocation_cursor(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_app;
    use crossterm::event::KeyEventState;
    use tickergrid_core::NO_SELECTION_TITLE;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn release_events_ignored() {
        let mut app = create_test_app();
        let key = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, key);
        assert!(app.running);
    }

    #[test]
    fn welcome_swallows_first_key() {
        let mut app = create_test_app();
        app.overlay = Overlay::Welcome;
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.overlay, Overlay::None);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn number_keys_and_tab_switch_panels() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_panel, Panel::Allocation);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_panel, Panel::Help);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_panel, Panel::Allocation);
    }

    #[test]
    fn enter_selects_and_esc_clears() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.chart.input.title, "MSFT");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.chart.input.title, NO_SELECTION_TITLE);
    }

    #[test]
    fn filter_overlay_edits_and_applies() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.overlay, Overlay::Filter);
        for c in "PnL<0".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // 'q' inside the overlay is text, not quit
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
        assert_eq!(app.grid.visible, vec![2]);

        press(&mut app, KeyCode::Char('x'));
        assert!(app.filters.is_empty());
    }

    #[test]
    fn allocation_enter_selects_row() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.allocation.cursor, 2);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_panel, Panel::Portfolio);
        assert_eq!(app.chart.input.title, "TSLA");
        assert_eq!(app.grid.cursor_row_index(), Some(2));
    }

    #[test]
    fn reload_without_file_warns() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('r'));
        assert!(matches!(
            app.status_message,
            Some((_, crate::app::StatusLevel::Warning))
        ));
    }
}
