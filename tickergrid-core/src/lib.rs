//! TickerGrid Core: the logic behind a portfolio grid and its detail chart.
//!
//! This crate holds everything that does not depend on a UI toolkit:
//! - Domain types (ticker records, price points, row identities)
//! - Derived columns: profit/loss, currency text, gain/loss hints
//! - Row data model with identity checks at ingestion
//! - Column schema and per-column filters
//! - Selection state and the selection → chart projection
//! - Allocation view, sample data, JSON loading, TOML configuration

pub mod allocation;
pub mod config;
pub mod data;
pub mod domain;
pub mod filter;
pub mod format;
pub mod model;
pub mod schema;
pub mod selection;
pub mod valuation;

pub use allocation::{allocation, select_slice, AllocationSlice, ALLOCATION_TITLE};
pub use config::{AppConfig, ConfigError};
pub use domain::{MalformedRecord, PricePoint, RawTicker, RowId, Ticker};
pub use filter::{ColumnFilter, CompareOp, FilterParseError, FilterSet};
pub use format::{format_currency, format_number, sparkline, PLACEHOLDER};
pub use model::{row_id, DerivedRow, IngestError, Row, RowDataModel, RowRecord};
pub use schema::{Cell, ColumnDef, ColumnId, RenderOptions, COLUMNS};
pub use selection::{
    ChartInput, SelectionChanged, SelectionProjector, SelectionState, NO_SELECTION_TITLE,
};
pub use valuation::{profit_and_loss, style_hint, StyleHint};
