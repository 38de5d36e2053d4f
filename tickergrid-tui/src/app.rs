//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. Selection changes go through
//! [`AppState::notify`], which is the only place the chart input is written.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tickergrid_core::{
    allocation, data::load_model, select_slice, AllocationSlice, ChartInput, ColumnFilter, FilterSet,
    RenderOptions, RowDataModel, SelectionChanged, SelectionProjector, SelectionState,
};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Portfolio,
    Allocation,
    Help,
}

impl Panel {
    const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Panel::Portfolio => 0,
            Panel::Allocation => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Portfolio),
            1 => Some(Panel::Allocation),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Portfolio => "Portfolio",
            Panel::Allocation => "Allocation",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Portfolio)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT)
            .unwrap_or(Panel::Portfolio)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Filter,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Data => "DATA",
            ErrorCategory::Filter => "FLT",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Grid panel state: cursor and scroll over the filtered rows.
#[derive(Debug, Clone, Default)]
pub struct GridPanelState {
    /// Model indices of rows passing the filters, in display order.
    pub visible: Vec<usize>,
    /// Position within `visible`.
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Body rows that fit on screen, updated from the terminal size.
    pub viewport: usize,
}

impl GridPanelState {
    pub fn new(row_count: usize) -> Self {
        Self {
            visible: (0..row_count).collect(),
            cursor: 0,
            scroll_offset: 0,
            viewport: 10,
        }
    }

    /// Model index of the row under the cursor.
    pub fn cursor_row_index(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.cursor = 0;
        } else {
            let last = self.visible.len() - 1;
            self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        }
        self.ensure_visible();
    }

    pub fn move_to_top(&mut self) {
        self.cursor = 0;
        self.ensure_visible();
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
        self.ensure_visible();
    }

    /// Put the cursor on a model row if it is visible.
    pub fn focus_model_index(&mut self, index: usize) -> bool {
        match self.visible.iter().position(|&i| i == index) {
            Some(pos) => {
                self.cursor = pos;
                self.ensure_visible();
                true
            }
            None => false,
        }
    }

    /// Scroll so the cursor row is on screen.
    pub fn ensure_visible(&mut self) {
        let height = self.viewport.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
        let max_offset = self.visible.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

/// Detail chart panel state.
#[derive(Debug, Clone, Default)]
pub struct ChartPanelState {
    pub input: ChartInput,
}

/// Allocation panel state.
#[derive(Debug, Clone, Default)]
pub struct AllocationPanelState {
    pub slices: Vec<AllocationSlice>,
    pub cursor: usize,
}

impl AllocationPanelState {
    pub fn selected_slice(&self) -> Option<&AllocationSlice> {
        self.slices.get(self.cursor)
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Filter,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Data
    pub model: RowDataModel,
    pub selection: SelectionState,
    pub filters: FilterSet,
    pub options: RenderOptions,
    pub source_label: String,
    /// File the model was loaded from; `None` for the sample portfolio.
    pub data_path: Option<PathBuf>,

    // Panel states
    pub grid: GridPanelState,
    pub chart: ChartPanelState,
    pub allocation: AllocationPanelState,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub filter_input: String,
}

impl AppState {
    pub fn new(model: RowDataModel, options: RenderOptions, source_label: String) -> Self {
        let grid = GridPanelState::new(model.len());
        let allocation = AllocationPanelState {
            slices: allocation(&model),
            cursor: 0,
        };
        let selection = SelectionState::new();
        let chart = ChartPanelState {
            input: SelectionProjector::project(&selection.snapshot(&model)),
        };
        let mut app = Self {
            active_panel: Panel::Portfolio,
            running: true,
            model,
            selection,
            filters: FilterSet::new(),
            options,
            source_label,
            data_path: None,
            grid,
            chart,
            allocation,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            filter_input: String::new(),
        };
        app.report_malformed_rows();
        app
    }

    /// React to a selection notification: redraw the chart from it.
    pub fn notify(&mut self, event: SelectionChanged) {
        self.chart.input = SelectionProjector::project(&event);
        log::debug!("chart now shows {:?}", self.chart.input.title);
    }

    /// Select the row under the grid cursor.
    pub fn select_cursor_row(&mut self) {
        let Some(index) = self.grid.cursor_row_index() else {
            return;
        };
        let row = &self.model.rows()[index];
        let id = row.id.clone();
        if let Some(err) = row.malformed() {
            let msg = format!("{id} cannot be charted: {err}");
            self.set_warning(msg);
            return;
        }
        if let Some(event) = self.selection.select_id(&self.model, id.as_str()) {
            self.notify(event);
            self.set_status(format!("Selected {id}"));
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(event) = self.selection.clear() {
            self.notify(event);
            self.set_status("Selection cleared");
        }
    }

    /// Select a row by ticker and scroll it into view.
    ///
    /// Filters that hide the row are cleared so it can be shown.
    pub fn select_ticker(&mut self, ticker: &str) -> bool {
        let index = match select_slice(&mut self.selection, &self.model, ticker) {
            Some((event, index)) => {
                self.notify(event);
                index
            }
            None if self.selection.is_selected(ticker) => match self.model.index_of(ticker) {
                Some(index) => index,
                None => return false,
            },
            None => return false,
        };
        if !self.grid.focus_model_index(index) {
            self.filters.clear();
            self.refresh_visible();
            self.grid.focus_model_index(index);
        }
        self.set_status(format!("Selected {ticker}"));
        true
    }

    /// Select the allocation slice under the cursor and jump to the grid.
    pub fn select_allocation_cursor(&mut self) {
        let Some(ticker) = self.allocation.selected_slice().map(|s| s.ticker.clone()) else {
            return;
        };
        self.select_ticker(&ticker);
        self.active_panel = Panel::Portfolio;
    }

    /// Parse whitespace-separated filter expressions. Empty input clears.
    pub fn apply_filter_text(&mut self, text: &str) {
        let mut filters = FilterSet::new();
        for expr in text.split_whitespace() {
            match expr.parse::<ColumnFilter>() {
                Ok(filter) => filters.set(filter),
                Err(e) => {
                    self.push_error(ErrorCategory::Filter, e.to_string(), expr.to_string());
                    return;
                }
            }
        }
        self.filters = filters;
        self.refresh_visible();
        if self.filters.is_empty() {
            self.set_status("Filters cleared");
        } else {
            self.set_status(format!(
                "Filter {}: {} of {} rows",
                self.filters,
                self.grid.visible.len(),
                self.model.len()
            ));
        }
    }

    /// Recompute visible rows, keeping the cursor on the same row when possible.
    pub fn refresh_visible(&mut self) {
        let current = self.grid.cursor_row_index();
        self.grid.visible = self.filters.visible_indices(&self.model);
        let kept = current.is_some_and(|i| self.grid.focus_model_index(i));
        if !kept {
            self.grid.cursor = 0;
            self.grid.scroll_offset = 0;
            self.grid.ensure_visible();
        }
    }

    /// Swap in a freshly loaded model. Selection is kept by row identity.
    pub fn replace_model(&mut self, model: RowDataModel) {
        self.model = model;
        self.allocation.slices = allocation(&self.model);
        self.allocation.cursor = self
            .allocation
            .cursor
            .min(self.allocation.slices.len().saturating_sub(1));
        self.refresh_visible();
        let event = self.selection.reconcile(&self.model);
        self.notify(event);
        self.report_malformed_rows();
    }

    /// Re-read the data file and swap the model in.
    pub fn reload(&mut self) {
        let Some(path) = self.data_path.clone() else {
            self.set_warning("Sample portfolio has no file to reload");
            return;
        };
        match load_model(&path) {
            Ok(model) => {
                let rows = model.len();
                self.replace_model(model);
                self.set_status(format!("Reloaded {rows} rows from {}", path.display()));
            }
            Err(e) => {
                self.push_error(ErrorCategory::Data, e.to_string(), path.display().to_string())
            }
        }
    }

    fn report_malformed_rows(&mut self) {
        let malformed: Vec<String> = self
            .model
            .rows()
            .iter()
            .filter_map(|r| r.malformed().map(|m| m.to_string()))
            .collect();
        for message in malformed {
            self.push_error(ErrorCategory::Data, message, self.source_label.clone());
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        log::warn!("[{}] {message} ({context})", category.label());
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_app, create_test_model};
    use tickergrid_core::NO_SELECTION_TITLE;

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Portfolio.next(), Panel::Allocation);
        assert_eq!(Panel::Help.next(), Panel::Portfolio);
        assert_eq!(Panel::Portfolio.prev(), Panel::Help);
        assert_eq!(Panel::Allocation.prev(), Panel::Portfolio);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..3 {
            let p = Panel::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Panel::from_index(3).is_none());
    }

    #[test]
    fn starts_with_empty_chart() {
        let app = create_test_app();
        assert_eq!(app.chart.input.title, NO_SELECTION_TITLE);
        assert!(app.selection.selected().is_none());
    }

    #[test]
    fn malformed_rows_reported_on_load() {
        let app = create_test_app();
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Data);
    }

    #[test]
    fn selecting_cursor_row_updates_chart() {
        let mut app = create_test_app();
        app.grid.move_cursor(1);
        app.select_cursor_row();
        assert_eq!(app.chart.input.title, "MSFT");
        assert!(app.selection.is_selected("MSFT"));

        app.clear_selection();
        assert_eq!(app.chart.input.title, NO_SELECTION_TITLE);
    }

    #[test]
    fn malformed_row_cannot_be_selected() {
        let mut app = create_test_app();
        app.grid.move_to_bottom();
        app.select_cursor_row();
        assert!(app.selection.selected().is_none());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = create_test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn error_category_labels() {
        assert_eq!(ErrorCategory::Data.label(), "DATA");
        assert_eq!(ErrorCategory::Filter.label(), "FLT");
        assert_eq!(ErrorCategory::Other.label(), "ERR");
    }

    #[test]
    fn filter_keeps_cursor_row() {
        let mut app = create_test_app();
        app.grid.move_cursor(1); // MSFT
        app.apply_filter_text("ticker~s");
        assert_eq!(app.grid.visible.len(), 2);
        assert_eq!(app.grid.cursor_row_index(), Some(1));

        app.apply_filter_text("");
        assert!(app.filters.is_empty());
        assert_eq!(app.grid.visible.len(), 4);
    }

    #[test]
    fn bad_filter_is_reported_and_ignored() {
        let mut app = create_test_app();
        app.apply_filter_text("ticker~a volume>3");
        assert!(app.filters.is_empty());
        assert_eq!(app.error_history[0].category, ErrorCategory::Filter);
    }

    #[test]
    fn select_ticker_clears_hiding_filter() {
        let mut app = create_test_app();
        app.apply_filter_text("ticker=AAPL");
        assert!(app.select_ticker("TSLA"));
        assert!(app.filters.is_empty());
        assert_eq!(app.grid.cursor_row_index(), Some(2));
        assert_eq!(app.chart.input.title, "TSLA");
    }

    #[test]
    fn allocation_enter_jumps_to_grid() {
        let mut app = create_test_app();
        app.active_panel = Panel::Allocation;
        app.allocation.cursor = 1;
        app.select_allocation_cursor();
        assert_eq!(app.active_panel, Panel::Portfolio);
        assert_eq!(app.chart.input.title, "MSFT");
    }

    #[test]
    fn replace_model_reconciles_selection() {
        let mut app = create_test_app();
        app.select_ticker("AAPL");
        app.replace_model(create_test_model());
        assert!(app.selection.is_selected("AAPL"));
        assert_eq!(app.chart.input.title, "AAPL");

        app.replace_model(RowDataModel::default());
        assert!(app.selection.selected().is_none());
        assert_eq!(app.chart.input.title, NO_SELECTION_TITLE);
        assert!(app.grid.visible.is_empty());
    }

    #[test]
    fn scrolling_follows_cursor() {
        let mut grid = GridPanelState::new(20);
        grid.viewport = 5;
        grid.move_cursor(7);
        assert_eq!(grid.scroll_offset, 3);
        grid.move_cursor(-6);
        assert_eq!(grid.scroll_offset, 1);
        grid.move_to_bottom();
        assert_eq!(grid.cursor, 19);
        assert_eq!(grid.scroll_offset, 15);
        grid.move_cursor(100);
        assert_eq!(grid.cursor, 19);
    }
}
