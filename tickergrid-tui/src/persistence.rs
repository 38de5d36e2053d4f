//! App state persistence: JSON save/load across restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub selected_ticker: Option<String>,
    pub active_panel: Panel,
    pub filters: String,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            selected_ticker: None,
            active_panel: Panel::Portfolio,
            filters: String::new(),
            welcome_dismissed: false,
        }
    }
}

/// `<config_dir>/tickergrid/state.json`, falling back to the working directory.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickergrid")
        .join("state.json")
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring corrupt state file {}: {e}", path.display());
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        selected_ticker: app.selection.selected().map(|id| id.to_string()),
        active_panel: app.active_panel,
        filters: app.filters.to_string(),
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
///
/// Filters go first so a restored selection can clear them if they would
/// hide the selected row. A ticker no longer in the data is dropped.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.active_panel = state.active_panel;
    if !state.filters.is_empty() {
        app.apply_filter_text(&state.filters);
    }
    if let Some(ticker) = &state.selected_ticker {
        if !app.select_ticker(ticker) {
            log::info!("saved selection {ticker} is not in the current data");
        }
    }
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_app;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let state = PersistedState {
            selected_ticker: Some("MSFT".into()),
            active_panel: Panel::Allocation,
            filters: "PnL>0".into(),
            welcome_dismissed: true,
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.selected_ticker.as_deref(), Some("MSFT"));
        assert_eq!(loaded.active_panel, Panel::Allocation);
        assert_eq!(loaded.filters, "PnL>0");
        assert!(loaded.welcome_dismissed);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert!(loaded.selected_ticker.is_none());
        assert!(!loaded.welcome_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.selected_ticker.is_none());
        assert_eq!(loaded.active_panel, Panel::Portfolio);
    }

    #[test]
    fn extract_then_apply() {
        let mut app = create_test_app();
        app.apply_filter_text("ticker~a");
        app.select_ticker("AAPL");
        app.active_panel = Panel::Help;
        let state = extract(&app);
        assert_eq!(state.selected_ticker.as_deref(), Some("AAPL"));
        assert_eq!(state.filters, "ticker~a");
        assert!(state.welcome_dismissed);

        let mut fresh = create_test_app();
        apply(&mut fresh, state);
        assert!(fresh.selection.is_selected("AAPL"));
        assert_eq!(fresh.chart.input.title, "AAPL");
        assert_eq!(fresh.active_panel, Panel::Help);
        assert_eq!(fresh.filters.to_string(), "ticker~a");
        assert_eq!(fresh.overlay, Overlay::None);
    }

    #[test]
    fn stale_selection_is_dropped() {
        let mut app = create_test_app();
        apply(
            &mut app,
            PersistedState {
                selected_ticker: Some("GONE".into()),
                ..PersistedState::default()
            },
        );
        assert!(app.selection.selected().is_none());
        assert_eq!(app.overlay, Overlay::Welcome);
    }
}
