//! Profit/loss and gain/loss classification.

use serde::{Deserialize, Serialize};

use crate::domain::Ticker;

/// Emphasis the host should give a profit/loss cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleHint {
    Gain,
    Loss,
}

impl StyleHint {
    pub fn label(self) -> &'static str {
        match self {
            StyleHint::Gain => "gain",
            StyleHint::Loss => "loss",
        }
    }
}

/// Unrealised profit/loss: `shares * current - shares * average`. Not rounded.
pub fn profit_and_loss(ticker: &Ticker) -> f64 {
    ticker.shares * ticker.current_price - ticker.shares * ticker.average_price
}

/// `Gain` only for strictly positive values; zero and NaN are `Loss`.
pub fn style_hint(value: f64) -> StyleHint {
    if value > 0.0 {
        StyleHint::Gain
    } else {
        StyleHint::Loss
    }
}
