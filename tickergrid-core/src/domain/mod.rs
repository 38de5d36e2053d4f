//! Domain types for TickerGrid

pub mod ids;
pub mod ticker;

pub use ids::RowId;
pub use ticker::{MalformedRecord, PricePoint, RawTicker, Ticker};
