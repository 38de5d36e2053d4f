//! Property tests for grid navigation and selection under random key sequences.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;

use tickergrid_core::{RenderOptions, RowDataModel, Ticker, NO_SELECTION_TITLE};
use tickergrid_tui::app::{AppState, GridPanelState};
use tickergrid_tui::handle_key;

// ── 1. Cursor and scroll window ──

proptest! {
    #[test]
    fn cursor_stays_in_window(
        rows in 0usize..60,
        viewport in 1usize..20,
        moves in prop::collection::vec(-25isize..25, 0..40),
    ) {
        let mut grid = GridPanelState::new(rows);
        grid.viewport = viewport;
        for delta in moves {
            grid.move_cursor(delta);
            if rows == 0 {
                prop_assert_eq!(grid.cursor, 0);
                prop_assert!(grid.cursor_row_index().is_none());
            } else {
                prop_assert!(grid.cursor < rows);
                prop_assert!(grid.scroll_offset <= grid.cursor);
                prop_assert!(grid.cursor < grid.scroll_offset + viewport);
            }
        }
    }
}

// ── 2. Chart always mirrors the selection ──

fn app(n: usize) -> AppState {
    let tickers = (0..n)
        .map(|i| Ticker::new(format!("T{i}"), 1.0 + i as f64, 10.0, 10.0 + i as f64))
        .collect();
    AppState::new(
        RowDataModel::from_tickers(tickers).unwrap(),
        RenderOptions::default(),
        "prop".into(),
    )
}

fn key_strategy() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Char('j')),
        Just(KeyCode::Char('k')),
        Just(KeyCode::Char('g')),
        Just(KeyCode::Char('G')),
        Just(KeyCode::Enter),
        Just(KeyCode::Esc),
        Just(KeyCode::Char('2')),
        Just(KeyCode::Char('1')),
    ]
}

proptest! {
    #[test]
    fn chart_title_tracks_selection(
        n in 1usize..15,
        keys in prop::collection::vec(key_strategy(), 0..60),
    ) {
        let mut app = app(n);
        for code in keys {
            handle_key(&mut app, KeyEvent::new(code, KeyModifiers::NONE));
            let expected = app
                .selection
                .selected()
                .map(|id| id.to_string())
                .unwrap_or_else(|| NO_SELECTION_TITLE.to_string());
            prop_assert_eq!(&app.chart.input.title, &expected);
            prop_assert!(app.running);
        }
    }
}
