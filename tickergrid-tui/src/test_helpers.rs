//! Test helpers for creating mock data

use tickergrid_core::{PricePoint, RawTicker, RenderOptions, RowDataModel, Ticker};

use crate::app::AppState;

/// AAPL, MSFT, TSLA, then one malformed row (BAD, no current price).
pub fn create_test_model() -> RowDataModel {
    let mut bad = RawTicker::from(Ticker::new("BAD", 1.0, 1.0, 1.0));
    bad.current_price = None;
    RowDataModel::ingest(vec![
        RawTicker::from(
            Ticker::new("AAPL", 10.0, 150.0, 175.0)
                .with_simple_history(vec![170.0, 172.0, 175.0])
                .with_detailed_history(vec![
                    PricePoint::new(1_704_153_600_000, 170.0),
                    PricePoint::new(1_704_240_000_000, 175.0),
                ]),
        ),
        RawTicker::from(
            Ticker::new("MSFT", 5.0, 300.0, 310.0)
                .with_detailed_history(vec![PricePoint::new(1_704_153_600_000, 310.0)]),
        ),
        RawTicker::from(Ticker::new("TSLA", 4.0, 250.0, 200.0)),
        bad,
    ])
    .unwrap()
}

pub fn create_test_app() -> AppState {
    AppState::new(
        create_test_model(),
        RenderOptions::default(),
        "test".to_string(),
    )
}
