//! Loading ticker records: JSON files and the built-in sample portfolio.

pub mod loader;
pub mod sample;

pub use loader::{load_model, load_records, parse_records, save_tickers, LoadError};
pub use sample::{sample_portfolio, SAMPLE_SEED};
