//! Per-column row filters.
//!
//! Filters are written as `<column><op><value>`, e.g. `ticker~aa`,
//! `PnL>0`, `shares>=10`. Text columns take `~` (contains) and `=`
//! (equals), both case-insensitive. Numeric columns take `= > >= < <=`
//! against the unformatted value, or `~` against the formatted text.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{Row, RowDataModel};
use crate::schema::{ColumnId, RenderOptions};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("filter {0:?} has no operator (expected one of ~ = > >= < <=)")]
    MissingOperator(String),

    #[error("unknown column {0:?}")]
    UnknownColumn(String),

    #[error("column {column} expects a number, got {value:?}")]
    InvalidNumber { column: &'static str, value: String },

    #[error("operator {op} is not supported on text column {column}")]
    UnsupportedOperator { column: &'static str, op: CompareOp },
}

/// Numeric comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One column filter.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    Text {
        column: ColumnId,
        needle: String,
        exact: bool,
    },
    Number {
        column: ColumnId,
        op: CompareOp,
        value: f64,
    },
}

impl ColumnFilter {
    pub fn column(&self) -> ColumnId {
        match self {
            ColumnFilter::Text { column, .. } | ColumnFilter::Number { column, .. } => *column,
        }
    }

    /// Whether a row passes. Malformed rows never pass a numeric filter.
    pub fn matches(&self, row: &Row) -> bool {
        let def = self.column().def();
        match self {
            ColumnFilter::Text { needle, exact, .. } => {
                let cell = match row.ticker() {
                    Some(t) => def.cell(t, &RenderOptions::default()),
                    None => return def.id == ColumnId::Ticker && text_match(row.id.as_str(), needle, *exact),
                };
                text_match(&cell.text, needle, *exact)
            }
            ColumnFilter::Number { op, value, .. } => row
                .ticker()
                .and_then(|t| def.value(t).as_number())
                .is_some_and(|n| op.apply(n, *value)),
        }
    }
}

fn text_match(haystack: &str, needle: &str, exact: bool) -> bool {
    if exact {
        haystack.eq_ignore_ascii_case(needle)
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl FromStr for ColumnFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pos = s
            .find(['~', '=', '<', '>'])
            .ok_or_else(|| FilterParseError::MissingOperator(s.to_string()))?;
        let (field, rest) = s.split_at(pos);
        let column = ColumnId::from_field(field)
            .ok_or_else(|| FilterParseError::UnknownColumn(field.trim().to_string()))?;

        let (op, value) = if let Some(v) = rest.strip_prefix(">=") {
            (Some(CompareOp::Ge), v)
        } else if let Some(v) = rest.strip_prefix("<=") {
            (Some(CompareOp::Le), v)
        } else if let Some(v) = rest.strip_prefix('>') {
            (Some(CompareOp::Gt), v)
        } else if let Some(v) = rest.strip_prefix('<') {
            (Some(CompareOp::Lt), v)
        } else if let Some(v) = rest.strip_prefix('=') {
            (Some(CompareOp::Eq), v)
        } else {
            // '~'
            (None, &rest[1..])
        };
        let value = value.trim();

        let numeric = column.def().is_numeric();
        match (op, numeric) {
            (None, _) => Ok(ColumnFilter::Text {
                column,
                needle: value.to_string(),
                exact: false,
            }),
            (Some(CompareOp::Eq), false) => Ok(ColumnFilter::Text {
                column,
                needle: value.to_string(),
                exact: true,
            }),
            (Some(op), false) => Err(FilterParseError::UnsupportedOperator {
                column: column.field(),
                op,
            }),
            (Some(op), true) => {
                let parsed = value
                    .trim_start_matches('$')
                    .replace(',', "")
                    .parse::<f64>()
                    .map_err(|_| FilterParseError::InvalidNumber {
                        column: column.field(),
                        value: value.to_string(),
                    })?;
                Ok(ColumnFilter::Number {
                    column,
                    op,
                    value: parsed,
                })
            }
        }
    }
}

impl fmt::Display for ColumnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnFilter::Text {
                column,
                needle,
                exact,
            } => write!(f, "{}{}{}", column.field(), if *exact { "=" } else { "~" }, needle),
            ColumnFilter::Number { column, op, value } => {
                write!(f, "{}{}{}", column.field(), op, value)
            }
        }
    }
}

/// Filters combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<ColumnFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, replacing any existing filter on the same column.
    pub fn set(&mut self, filter: ColumnFilter) {
        self.filters.retain(|f| f.column() != filter.column());
        self.filters.push(filter);
    }

    pub fn remove(&mut self, column: ColumnId) {
        self.filters.retain(|f| f.column() != column);
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Model indices of rows passing every filter, in display order.
    pub fn visible_indices(&self, model: &RowDataModel) -> Vec<usize> {
        model
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches(row))
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.filters.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" "))
    }
}
