//! Column schema: column id → value getter → formatter → style hint.
//!
//! The grid host walks [`COLUMNS`] in order and asks each definition for a
//! [`Cell`]; no rendering widget needs to know how a value is derived.

use serde::{Deserialize, Serialize};

use crate::domain::{RawTicker, Ticker};
use crate::format::{format_currency, format_number, sparkline, PLACEHOLDER};
use crate::valuation::{profit_and_loss, style_hint, StyleHint};

/// Grid columns, identified by their wire field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnId {
    #[serde(rename = "ticker")]
    Ticker,
    #[serde(rename = "shares")]
    Shares,
    #[serde(rename = "averagePrice")]
    AveragePrice,
    #[serde(rename = "currentPrice")]
    CurrentPrice,
    #[serde(rename = "simplePriceHistory")]
    SimplePriceHistory,
    #[serde(rename = "PnL")]
    ProfitAndLoss,
}

impl ColumnId {
    pub fn field(self) -> &'static str {
        match self {
            ColumnId::Ticker => "ticker",
            ColumnId::Shares => "shares",
            ColumnId::AveragePrice => "averagePrice",
            ColumnId::CurrentPrice => "currentPrice",
            ColumnId::SimplePriceHistory => "simplePriceHistory",
            ColumnId::ProfitAndLoss => "PnL",
        }
    }

    /// Case-insensitive lookup by field name.
    pub fn from_field(name: &str) -> Option<Self> {
        COLUMNS
            .iter()
            .map(|c| c.id)
            .find(|id| id.field().eq_ignore_ascii_case(name.trim()))
    }

    pub fn def(self) -> &'static ColumnDef {
        // COLUMNS holds exactly one entry per id.
        COLUMNS
            .iter()
            .find(|c| c.id == self)
            .unwrap_or(&COLUMNS[0])
    }
}

/// How a column's value becomes text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Number,
    Currency,
    Sparkline,
}

/// A raw cell value borrowed from the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
    Series(&'a [f64]),
}

impl CellValue<'_> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Options the host controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Number of trailing points drawn in the sparkline column.
    pub sparkline_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { sparkline_width: 30 }
    }
}

/// A formatted cell ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub column: ColumnId,
    pub text: String,
    /// Numeric value behind the text, for numeric filtering and sorting.
    pub number: Option<f64>,
    #[serde(rename = "emphasis", skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHint>,
}

/// One column of the grid.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub header: &'static str,
    pub format: Format,
    /// Whether the cell carries a gain/loss hint.
    pub styled: bool,
    value: fn(&Ticker) -> CellValue<'_>,
}

impl ColumnDef {
    pub fn value<'a>(&self, ticker: &'a Ticker) -> CellValue<'a> {
        (self.value)(ticker)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.format, Format::Number | Format::Currency)
    }

    /// Derive, format and style this column for a valid record.
    pub fn cell(&self, ticker: &Ticker, options: &RenderOptions) -> Cell {
        let value = self.value(ticker);
        let text = match (self.format, value) {
            (Format::Currency, CellValue::Number(n)) => format_currency(n),
            (Format::Number, CellValue::Number(n)) => format_number(n),
            (Format::Sparkline, CellValue::Series(s)) => sparkline(s, options.sparkline_width),
            (_, CellValue::Text(t)) => t.to_string(),
            (_, CellValue::Number(n)) => format_number(n),
            (_, CellValue::Series(s)) => sparkline(s, options.sparkline_width),
        };
        let number = value.as_number().filter(|n| n.is_finite());
        let style = if self.styled { number.map(style_hint) } else { None };

        Cell {
            column: self.id,
            text,
            number,
            style,
        }
    }

    /// Cell for a record whose numeric fields could not be validated.
    ///
    /// Identity and history still display; every numeric value is the
    /// placeholder and no style hint is given.
    pub fn placeholder_cell(&self, id: &str, raw: &RawTicker, options: &RenderOptions) -> Cell {
        let text = match self.id {
            ColumnId::Ticker => id.to_string(),
            ColumnId::SimplePriceHistory => {
                sparkline(&raw.simple_price_history, options.sparkline_width)
            }
            _ => PLACEHOLDER.to_string(),
        };
        Cell {
            column: self.id,
            text,
            number: None,
            style: None,
        }
    }
}

fn ticker_value(t: &Ticker) -> CellValue<'_> {
    CellValue::Text(&t.ticker)
}

fn shares_value(t: &Ticker) -> CellValue<'_> {
    CellValue::Number(t.shares)
}

fn average_price_value(t: &Ticker) -> CellValue<'_> {
    CellValue::Number(t.average_price)
}

fn current_price_value(t: &Ticker) -> CellValue<'_> {
    CellValue::Number(t.current_price)
}

fn history_value(t: &Ticker) -> CellValue<'_> {
    CellValue::Series(&t.simple_price_history)
}

fn pnl_value(t: &Ticker) -> CellValue<'_> {
    CellValue::Number(profit_and_loss(t))
}

/// Grid columns in display order.
pub static COLUMNS: [ColumnDef; 6] = [
    ColumnDef {
        id: ColumnId::Ticker,
        header: "Ticker",
        format: Format::Text,
        styled: false,
        value: ticker_value,
    },
    ColumnDef {
        id: ColumnId::Shares,
        header: "Shares",
        format: Format::Number,
        styled: false,
        value: shares_value,
    },
    ColumnDef {
        id: ColumnId::AveragePrice,
        header: "Average Price",
        format: Format::Currency,
        styled: false,
        value: average_price_value,
    },
    ColumnDef {
        id: ColumnId::CurrentPrice,
        header: "Current Price",
        format: Format::Currency,
        styled: false,
        value: current_price_value,
    },
    ColumnDef {
        id: ColumnId::SimplePriceHistory,
        header: "Last 30d",
        format: Format::Sparkline,
        styled: false,
        value: history_value,
    },
    ColumnDef {
        id: ColumnId::ProfitAndLoss,
        header: "Profit & Loss",
        format: Format::Currency,
        styled: true,
        value: pnl_value,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn aapl() -> Ticker {
        Ticker::new("AAPL", 10.0, 150.0, 175.5).with_simple_history(vec![1.0, 2.0, 3.0])
    }

    #[test]
    fn columns_in_display_order() {
        let headers: Vec<&str> = COLUMNS.iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            vec![
                "Ticker",
                "Shares",
                "Average Price",
                "Current Price",
                "Last 30d",
                "Profit & Loss"
            ]
        );
    }

    #[test]
    fn field_lookup() {
        assert_eq!(ColumnId::from_field("pnl"), Some(ColumnId::ProfitAndLoss));
        assert_eq!(ColumnId::from_field("averagePrice"), Some(ColumnId::AveragePrice));
        assert_eq!(ColumnId::from_field(" Ticker "), Some(ColumnId::Ticker));
        assert_eq!(ColumnId::from_field("volume"), None);
        assert_eq!(ColumnId::Shares.def().header, "Shares");
    }

    #[test]
    fn cells_for_valid_record() {
        let t = aapl();
        let opts = RenderOptions::default();
        let cells: Vec<Cell> = COLUMNS.iter().map(|c| c.cell(&t, &opts)).collect();

        assert_eq!(cells[0].text, "AAPL");
        assert_eq!(cells[1].text, "10");
        assert_eq!(cells[2].text, "$150.00");
        assert_eq!(cells[3].text, "$175.50");
        assert_eq!(cells[4].text, "▁▅█");
        assert_eq!(cells[5].text, "$255.00");
        assert_eq!(cells[5].number, Some(255.0));
        assert_eq!(cells[5].style, Some(StyleHint::Gain));
        assert!(cells[2].style.is_none());
    }

    #[test]
    fn placeholder_cells_for_malformed_record() {
        let raw = RawTicker {
            ticker: Some("BAD".into()),
            simple_price_history: vec![1.0, 1.0],
            ..RawTicker::default()
        };
        let opts = RenderOptions::default();
        let cells: Vec<Cell> = COLUMNS
            .iter()
            .map(|c| c.placeholder_cell("BAD", &raw, &opts))
            .collect();

        assert_eq!(cells[0].text, "BAD");
        for idx in [1, 2, 3, 5] {
            assert_eq!(cells[idx].text, PLACEHOLDER);
            assert!(cells[idx].number.is_none());
            assert!(cells[idx].style.is_none());
        }
        assert_eq!(cells[4].text, "▄▄");
    }

    #[test]
    fn cell_serializes_emphasis() {
        let cell = ColumnId::ProfitAndLoss.def().cell(&aapl(), &RenderOptions::default());
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["column"], "PnL");
        assert_eq!(json["emphasis"], "gain");
    }
}
