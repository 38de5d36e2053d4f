//! Ticker: one portfolio position.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One point of a ticker's detailed price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    #[serde(alias = "t")]
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// The timestamp as a UTC datetime, if it is in chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// A validated portfolio position.
///
/// `ticker` is non-empty and is the sole identity key of the record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub ticker: String,
    pub shares: f64,
    pub average_price: f64,
    pub current_price: f64,
    #[serde(default)]
    pub simple_price_history: Vec<f64>,
    #[serde(default)]
    pub detailed_price_history: Vec<PricePoint>,
}

impl Ticker {
    pub fn new(
        ticker: impl Into<String>,
        shares: f64,
        average_price: f64,
        current_price: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            shares,
            average_price,
            current_price,
            simple_price_history: Vec::new(),
            detailed_price_history: Vec::new(),
        }
    }

    pub fn with_simple_history(mut self, history: Vec<f64>) -> Self {
        self.simple_price_history = history;
        self
    }

    pub fn with_detailed_history(mut self, history: Vec<PricePoint>) -> Self {
        self.detailed_price_history = history;
        self
    }
}

/// Wire form of a ticker record as it arrives from a data source.
///
/// Every numeric field is optional so that missing values are detected at
/// ingestion instead of surfacing as a wrong number in the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTicker {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub shares: Option<f64>,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub simple_price_history: Vec<f64>,
    #[serde(default)]
    pub detailed_price_history: Vec<PricePoint>,
}

/// A record that has an identity but missing or non-finite numeric fields.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("record {ticker:?} has missing or non-finite fields: {}", .fields.join(", "))]
pub struct MalformedRecord {
    pub ticker: String,
    pub fields: Vec<&'static str>,
}

impl RawTicker {
    /// Check required numeric fields and produce a validated `Ticker`.
    ///
    /// The identity itself is checked by the ingestion step, so a missing
    /// ticker is reported here as an empty string.
    pub fn validate(&self) -> Result<Ticker, MalformedRecord> {
        let ticker = self.ticker.clone().unwrap_or_default();
        let mut fields = Vec::new();

        let mut require = |name: &'static str, value: Option<f64>| match value {
            Some(v) if v.is_finite() => v,
            _ => {
                fields.push(name);
                f64::NAN
            }
        };
        let shares = require("shares", self.shares);
        let average_price = require("averagePrice", self.average_price);
        let current_price = require("currentPrice", self.current_price);

        if !fields.is_empty() {
            return Err(MalformedRecord { ticker, fields });
        }

        Ok(Ticker {
            ticker,
            shares,
            average_price,
            current_price,
            simple_price_history: self.simple_price_history.clone(),
            detailed_price_history: self.detailed_price_history.clone(),
        })
    }
}

impl From<Ticker> for RawTicker {
    fn from(t: Ticker) -> Self {
        Self {
            ticker: Some(t.ticker),
            shares: Some(t.shares),
            average_price: Some(t.average_price),
            current_price: Some(t.current_price),
            simple_price_history: t.simple_price_history,
            detailed_price_history: t.detailed_price_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawTicker {
        RawTicker {
            ticker: Some("AAPL".into()),
            shares: Some(10.0),
            average_price: Some(150.0),
            current_price: Some(175.5),
            simple_price_history: vec![170.0, 172.0, 175.5],
            detailed_price_history: vec![PricePoint::new(1, 10.0)],
        }
    }

    #[test]
    fn valid_record_passes() {
        let ticker = sample_raw().validate().unwrap();
        assert_eq!(ticker.ticker, "AAPL");
        assert_eq!(ticker.shares, 10.0);
        assert_eq!(ticker.detailed_price_history.len(), 1);
    }

    #[test]
    fn missing_fields_are_listed() {
        let mut raw = sample_raw();
        raw.shares = None;
        raw.current_price = Some(f64::NAN);
        let err = raw.validate().unwrap_err();
        assert_eq!(err.ticker, "AAPL");
        assert_eq!(err.fields, vec!["shares", "currentPrice"]);
        assert!(err.to_string().contains("shares, currentPrice"));
    }

    #[test]
    fn camel_case_wire_format() {
        let json = r#"{
            "ticker": "MSFT",
            "shares": 5,
            "averagePrice": 300.0,
            "currentPrice": 310.25,
            "simplePriceHistory": [300, 305, 310.25],
            "detailedPriceHistory": [{"t": 1, "price": 10}]
        }"#;
        let ticker: Ticker = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.average_price, 300.0);
        assert_eq!(ticker.detailed_price_history[0], PricePoint::new(1, 10.0));

        let raw: RawTicker = serde_json::from_str(r#"{"ticker": "X"}"#).unwrap();
        assert!(raw.shares.is_none());
        assert!(raw.simple_price_history.is_empty());
    }

    #[test]
    fn price_point_datetime() {
        let point = PricePoint::new(1_704_153_600_000, 1.0);
        assert_eq!(
            point.datetime().unwrap().format("%Y-%m-%d").to_string(),
            "2024-01-02"
        );
    }

    #[test]
    fn ticker_to_raw_roundtrip_validates() {
        let ticker = Ticker::new("KO", 3.0, 60.0, 61.0).with_simple_history(vec![60.0, 61.0]);
        let raw = RawTicker::from(ticker.clone());
        assert_eq!(raw.validate().unwrap(), ticker);
    }
}
