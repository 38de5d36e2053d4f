//! Selection state and the selection → chart projection.
//!
//! The host grid reports selection through [`SelectionChanged`]; the detail
//! chart is redrawn from the [`ChartInput`] that [`SelectionProjector`]
//! returns. The projector keeps no state of its own.

use serde::{Deserialize, Serialize};

use crate::domain::{PricePoint, RowId, Ticker};
use crate::model::RowDataModel;

/// Chart title shown while nothing is selected.
pub const NO_SELECTION_TITLE: &str = "Select a ticker to see detailed price history";

/// Everything the detail chart needs to redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInput {
    pub title: String,
    pub series: Vec<PricePoint>,
}

impl ChartInput {
    pub fn empty() -> Self {
        Self {
            title: NO_SELECTION_TITLE.to_string(),
            series: Vec::new(),
        }
    }

    pub fn has_series(&self) -> bool {
        !self.series.is_empty()
    }

    /// Min and max price of the series.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut prices = self.series.iter().map(|p| p.price).filter(|p| p.is_finite());
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Earliest and latest points of the series, whatever order it arrived in.
    pub fn time_bounds(&self) -> Option<(&PricePoint, &PricePoint)> {
        let earliest = self.series.iter().min_by_key(|p| p.timestamp)?;
        let latest = self.series.iter().max_by_key(|p| p.timestamp)?;
        Some((earliest, latest))
    }
}

impl Default for ChartInput {
    fn default() -> Self {
        Self::empty()
    }
}

/// Notification that the grid's selection changed.
///
/// The grid selects at most one row; if more arrive, the first wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionChanged {
    pub selected: Vec<Ticker>,
}

impl SelectionChanged {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(ticker: Ticker) -> Self {
        Self {
            selected: vec![ticker],
        }
    }

    pub fn first(&self) -> Option<&Ticker> {
        self.selected.first()
    }
}

/// Stateless selection → chart transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionProjector;

impl SelectionProjector {
    pub fn project(event: &SelectionChanged) -> ChartInput {
        if event.selected.len() > 1 {
            log::warn!(
                "{} rows selected under single selection; charting the first",
                event.selected.len()
            );
        }
        match event.first() {
            Some(ticker) => ChartInput {
                title: ticker.ticker.clone(),
                series: ticker.detailed_price_history.clone(),
            },
            None => ChartInput::empty(),
        }
    }
}

/// Single-row selection, keyed by row identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<RowId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&RowId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s == id)
    }

    /// Select a row by identity, replacing any previous selection.
    ///
    /// Returns the notification when the selection changed. Unknown ids and
    /// malformed rows cannot be selected and leave the state untouched.
    pub fn select_id(&mut self, model: &RowDataModel, id: &str) -> Option<SelectionChanged> {
        if self.is_selected(id) {
            return None;
        }
        let row = model.get(id)?;
        let Some(ticker) = row.ticker() else {
            log::debug!("ignoring selection of malformed row {id}");
            return None;
        };
        self.selected = Some(row.id.clone());
        Some(SelectionChanged::single(ticker.clone()))
    }

    /// Select the row at a display index.
    pub fn select_index(&mut self, model: &RowDataModel, index: usize) -> Option<SelectionChanged> {
        let id = model.rows().get(index)?.id.clone();
        self.select_id(model, id.as_str())
    }

    /// Clear the selection. Returns the notification if something was selected.
    pub fn clear(&mut self) -> Option<SelectionChanged> {
        self.selected.take().map(|_| SelectionChanged::none())
    }

    /// Current selection as a notification.
    pub fn snapshot(&self, model: &RowDataModel) -> SelectionChanged {
        self.selected
            .as_ref()
            .and_then(|id| model.get(id.as_str()))
            .and_then(|row| row.ticker())
            .map(|t| SelectionChanged::single(t.clone()))
            .unwrap_or_default()
    }

    /// Re-apply the selection to a freshly loaded model.
    ///
    /// The selection survives when its identity is still present and valid;
    /// otherwise it is dropped. Always returns a notification so the chart
    /// picks up any changed history.
    pub fn reconcile(&mut self, model: &RowDataModel) -> SelectionChanged {
        let event = self.snapshot(model);
        if event.selected.is_empty() {
            self.selected = None;
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawTicker;

    fn model() -> RowDataModel {
        let mut bad = RawTicker::from(Ticker::new("BAD", 1.0, 1.0, 1.0));
        bad.current_price = None;
        RowDataModel::ingest(vec![
            RawTicker::from(
                Ticker::new("AAPL", 1.0, 1.0, 2.0)
                    .with_detailed_history(vec![PricePoint::new(1, 10.0)]),
            ),
            RawTicker::from(Ticker::new("MSFT", 1.0, 1.0, 2.0)),
            bad,
        ])
        .unwrap()
    }

    #[test]
    fn project_nothing_selected() {
        let chart = SelectionProjector::project(&SelectionChanged::none());
        assert_eq!(chart.title, NO_SELECTION_TITLE);
        assert!(chart.series.is_empty());
        assert_eq!(chart, ChartInput::default());
    }

    #[test]
    fn project_selected_record() {
        let ticker =
            Ticker::new("AAPL", 1.0, 1.0, 1.0).with_detailed_history(vec![PricePoint::new(1, 10.0)]);
        let chart = SelectionProjector::project(&SelectionChanged::single(ticker));
        assert_eq!(chart.title, "AAPL");
        assert_eq!(chart.series, vec![PricePoint::new(1, 10.0)]);
    }

    #[test]
    fn project_takes_first_of_many() {
        let event = SelectionChanged {
            selected: vec![
                Ticker::new("AAPL", 1.0, 1.0, 1.0),
                Ticker::new("MSFT", 1.0, 1.0, 1.0),
            ],
        };
        assert_eq!(SelectionProjector::project(&event).title, "AAPL");
    }

    #[test]
    fn select_replaces_previous() {
        let model = model();
        let mut state = SelectionState::new();

        let event = state.select_id(&model, "AAPL").unwrap();
        assert_eq!(event.first().unwrap().ticker, "AAPL");

        let event = state.select_id(&model, "MSFT").unwrap();
        assert_eq!(event.selected.len(), 1);
        assert!(state.is_selected("MSFT"));
        assert!(!state.is_selected("AAPL"));
    }

    #[test]
    fn reselecting_same_row_is_not_a_change() {
        let model = model();
        let mut state = SelectionState::new();
        assert!(state.select_id(&model, "AAPL").is_some());
        assert!(state.select_id(&model, "AAPL").is_none());
    }

    #[test]
    fn unknown_and_malformed_rows_not_selectable() {
        let model = model();
        let mut state = SelectionState::new();
        assert!(state.select_id(&model, "NOPE").is_none());
        assert!(state.select_id(&model, "BAD").is_none());
        assert!(state.selected().is_none());
    }

    #[test]
    fn select_by_index_and_clear() {
        let model = model();
        let mut state = SelectionState::new();
        let event = state.select_index(&model, 1).unwrap();
        assert_eq!(event.first().unwrap().ticker, "MSFT");

        assert_eq!(state.clear(), Some(SelectionChanged::none()));
        assert_eq!(state.clear(), None);
        assert!(state.select_index(&model, 99).is_none());
    }

    #[test]
    fn reconcile_keeps_or_drops() {
        let model = model();
        let mut state = SelectionState::new();
        state.select_id(&model, "AAPL");

        let reloaded = RowDataModel::from_tickers(vec![Ticker::new("AAPL", 2.0, 1.0, 3.0)]).unwrap();
        let event = state.reconcile(&reloaded);
        assert_eq!(event.first().unwrap().shares, 2.0);
        assert!(state.is_selected("AAPL"));

        let without = RowDataModel::from_tickers(vec![Ticker::new("MSFT", 1.0, 1.0, 1.0)]).unwrap();
        let event = state.reconcile(&without);
        assert!(event.selected.is_empty());
        assert!(state.selected().is_none());
    }

    #[test]
    fn price_bounds() {
        let chart = ChartInput {
            title: "X".into(),
            series: vec![PricePoint::new(1, 5.0), PricePoint::new(2, 3.0), PricePoint::new(3, 8.0)],
        };
        assert_eq!(chart.price_bounds(), Some((3.0, 8.0)));
        assert_eq!(ChartInput::empty().price_bounds(), None);
    }

    #[test]
    fn time_bounds_ignore_series_order() {
        let chart = ChartInput {
            title: "X".into(),
            series: vec![PricePoint::new(30, 5.0), PricePoint::new(10, 3.0), PricePoint::new(20, 8.0)],
        };
        let (earliest, latest) = chart.time_bounds().unwrap();
        assert_eq!(earliest.timestamp, 10);
        assert_eq!(latest.timestamp, 30);
        assert_eq!(ChartInput::empty().time_bounds(), None);
    }
}
