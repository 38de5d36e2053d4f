//! TickerGrid TUI - terminal portfolio grid with a linked detail chart
//!
//! Provides interactive exploration of a portfolio with:
//! - A sortable-by-eye grid with profit/loss colouring and sparklines
//! - A detail price chart that follows the selected row
//! - An allocation view whose entries select grid rows
//! - Column filters, persisted session state and an error history

pub mod app;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
