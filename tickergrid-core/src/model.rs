//! Row data model: identity assignment, ingestion checks, derived rows.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{MalformedRecord, RawTicker, RowId, Ticker};
use crate::schema::{Cell, RenderOptions, COLUMNS};
use crate::valuation::{profit_and_loss, style_hint, StyleHint};

/// Errors that reject a whole record set at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("duplicate row identity {ticker:?} (records {first} and {second})")]
    DuplicateIdentity {
        ticker: String,
        first: usize,
        second: usize,
    },

    #[error("record {index} has no ticker")]
    MissingIdentity { index: usize },
}

/// Row identity for a record: its ticker.
pub fn row_id(ticker: &Ticker) -> RowId {
    RowId::new(ticker.ticker.as_str())
}

/// What a row holds after validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRecord {
    Valid(Ticker),
    Malformed {
        raw: RawTicker,
        error: MalformedRecord,
    },
}

/// One grid row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub record: RowRecord,
}

impl Row {
    /// The validated record, or `None` for a malformed row.
    pub fn ticker(&self) -> Option<&Ticker> {
        match &self.record {
            RowRecord::Valid(t) => Some(t),
            RowRecord::Malformed { .. } => None,
        }
    }

    pub fn malformed(&self) -> Option<&MalformedRecord> {
        match &self.record {
            RowRecord::Valid(_) => None,
            RowRecord::Malformed { error, .. } => Some(error),
        }
    }

    pub fn profit_and_loss(&self) -> Option<f64> {
        self.ticker().map(profit_and_loss)
    }

    /// Cells for every column, in display order.
    pub fn cells(&self, options: &RenderOptions) -> Vec<Cell> {
        COLUMNS
            .iter()
            .map(|col| match &self.record {
                RowRecord::Valid(t) => col.cell(t, options),
                RowRecord::Malformed { raw, .. } => {
                    col.placeholder_cell(self.id.as_str(), raw, options)
                }
            })
            .collect()
    }

    pub fn derive(&self, options: &RenderOptions) -> DerivedRow {
        let profit_and_loss = self.profit_and_loss();
        DerivedRow {
            id: self.id.clone(),
            profit_and_loss,
            hint: profit_and_loss.map(style_hint),
            cells: self.cells(options),
            malformed: self.malformed().cloned(),
        }
    }
}

/// Read-only derived view of a row, as handed to the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRow {
    pub id: RowId,
    pub profit_and_loss: Option<f64>,
    pub hint: Option<StyleHint>,
    pub cells: Vec<Cell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malformed: Option<MalformedRecord>,
}

/// Ordered rows with a unique identity per row.
#[derive(Debug, Clone, Default)]
pub struct RowDataModel {
    rows: Vec<Row>,
    index: HashMap<RowId, usize>,
}

impl RowDataModel {
    /// Validate identities and numeric fields of a record set.
    ///
    /// A missing or duplicate ticker rejects the whole set. Records with bad
    /// numeric fields are kept as malformed rows.
    pub fn ingest(records: Vec<RawTicker>) -> Result<Self, IngestError> {
        let mut rows = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for (i, raw) in records.into_iter().enumerate() {
            let id = match raw.ticker.as_deref() {
                Some(t) if !t.trim().is_empty() => RowId::new(t),
                _ => return Err(IngestError::MissingIdentity { index: i }),
            };
            if let Some(&first) = index.get(&id) {
                return Err(IngestError::DuplicateIdentity {
                    ticker: id.into_string(),
                    first,
                    second: i,
                });
            }
            index.insert(id.clone(), i);

            let record = match raw.validate() {
                Ok(ticker) => RowRecord::Valid(ticker),
                Err(error) => {
                    log::warn!("{error}");
                    RowRecord::Malformed { raw, error }
                }
            };
            rows.push(Row { id, record });
        }

        let model = Self { rows, index };
        log::debug!(
            "ingested {} rows ({} malformed)",
            model.len(),
            model.malformed_count()
        );
        Ok(model)
    }

    /// Ingest already-typed records. Non-finite numbers still become malformed rows.
    pub fn from_tickers(tickers: Vec<Ticker>) -> Result<Self, IngestError> {
        Self::ingest(tickers.into_iter().map(RawTicker::from).collect())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Row> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    /// Display position of a row, for scrolling it into view.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RowId> {
        self.rows.iter().map(|r| &r.id)
    }

    /// Valid records in display order.
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.rows.iter().filter_map(Row::ticker)
    }

    pub fn malformed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.malformed().is_some()).count()
    }

    /// Derived view of every row. Pure: repeated calls return equal output.
    pub fn derive_all(&self, options: &RenderOptions) -> Vec<DerivedRow> {
        self.rows.iter().map(|r| r.derive(options)).collect()
    }

    /// Sum of P&L over valid rows.
    pub fn total_profit_and_loss(&self) -> f64 {
        self.tickers().map(profit_and_loss).sum()
    }
}
