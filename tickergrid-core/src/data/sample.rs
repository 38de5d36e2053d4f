//! Sample portfolio generator.
//!
//! Produces a reproducible portfolio with random-walk price histories:
//! - a 30-point simple history feeding the sparkline column
//! - a 90-day detailed history feeding the detail chart
//! - `current_price` equal to the last detailed price

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{PricePoint, Ticker};

/// Seed used when none is configured.
pub const SAMPLE_SEED: u64 = 42;

const DETAILED_DAYS: i64 = 90;
const SIMPLE_POINTS: usize = 30;

/// (ticker, shares, average price, daily volatility)
const POSITIONS: &[(&str, f64, f64, f64)] = &[
    ("AAPL", 120.0, 162.35, 0.014),
    ("MSFT", 45.0, 318.20, 0.012),
    ("GOOGL", 60.0, 128.90, 0.016),
    ("AMZN", 80.0, 142.10, 0.018),
    ("NVDA", 35.0, 455.75, 0.028),
    ("TSLA", 25.0, 248.40, 0.032),
    ("META", 30.0, 301.55, 0.022),
    ("JPM", 70.0, 151.00, 0.011),
    ("V", 40.0, 244.80, 0.009),
    ("KO", 150.0, 59.45, 0.007),
    ("PFE", 200.0, 33.10, 0.013),
    ("XOM", 90.0, 108.25, 0.015),
];

/// Build the sample portfolio. The same seed always yields the same records.
pub fn sample_portfolio(seed: u64) -> Vec<Ticker> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();

    POSITIONS
        .iter()
        .map(|&(symbol, shares, average_price, volatility)| {
            let drift = rng.gen_range(-0.002..0.003);
            let opening = average_price * rng.gen_range(0.85..1.15);
            let detailed = random_walk(&mut rng, start, opening, drift, volatility);

            let current_price = detailed.last().map(|p| p.price).unwrap_or(opening);
            let simple = detailed
                .iter()
                .rev()
                .take(SIMPLE_POINTS)
                .rev()
                .map(|p| round_cents(p.price))
                .collect();

            Ticker {
                ticker: symbol.to_string(),
                shares,
                average_price,
                current_price: round_cents(current_price),
                simple_price_history: simple,
                detailed_price_history: detailed,
            }
        })
        .collect()
}

fn random_walk(
    rng: &mut StdRng,
    start: NaiveDate,
    opening: f64,
    drift: f64,
    volatility: f64,
) -> Vec<PricePoint> {
    let mut price = opening;
    (0..DETAILED_DAYS)
        .map(|offset| {
            if offset > 0 {
                let noise: f64 = rng.gen_range(-1.0..1.0);
                price *= 1.0 + drift + volatility * noise;
                // Floor at 1% of the opening price
                price = price.max(opening * 0.01);
            }
            let date = start + Duration::days(offset);
            let timestamp = date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis())
                .unwrap_or_default();
            PricePoint::new(timestamp, round_cents(price))
        })
        .collect()
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
