//! Portfolio allocation view.
//!
//! Sized by average price and coloured by profit/loss, one slice per valid
//! row. Picking a slice selects the matching grid row.

use serde::Serialize;

use crate::model::RowDataModel;
use crate::selection::{SelectionChanged, SelectionState};
use crate::valuation::{profit_and_loss, style_hint, StyleHint};

/// Chart title of the allocation view.
pub const ALLOCATION_TITLE: &str = "Portfolio Allocation";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub ticker: String,
    pub weight: f64,
    /// Fraction of the total weight, in `[0, 1]`.
    pub share: f64,
    pub profit_and_loss: f64,
    pub hint: StyleHint,
}

/// One slice per valid row, in display order. Malformed rows are skipped.
pub fn allocation(model: &RowDataModel) -> Vec<AllocationSlice> {
    let total: f64 = model
        .tickers()
        .map(|t| t.average_price.max(0.0))
        .sum();

    model
        .tickers()
        .map(|t| {
            let weight = t.average_price.max(0.0);
            let pnl = profit_and_loss(t);
            AllocationSlice {
                ticker: t.ticker.clone(),
                weight,
                share: if total > 0.0 { weight / total } else { 0.0 },
                profit_and_loss: pnl,
                hint: style_hint(pnl),
            }
        })
        .collect()
}

/// Select the grid row behind an allocation slice.
///
/// Returns the notification and the row's display index so the host can
/// scroll it into view.
pub fn select_slice(
    selection: &mut SelectionState,
    model: &RowDataModel,
    ticker: &str,
) -> Option<(SelectionChanged, usize)> {
    let index = model.index_of(ticker)?;
    let event = selection.select_id(model, ticker)?;
    Some((event, index))
}
