//! Load ticker records from JSON files.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::domain::{RawTicker, Ticker};
use crate::model::{IngestError, RowDataModel};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse ticker records in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Parse a JSON array of ticker records, or a single record object.
pub fn parse_records(json: &str) -> Result<Vec<RawTicker>, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    if value.is_array() {
        serde_json::from_value(value)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

/// Read raw ticker records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<RawTicker>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read and ingest a JSON file into a row model.
pub fn load_model(path: &Path) -> Result<RowDataModel, LoadError> {
    Ok(RowDataModel::ingest(load_records(path)?)?)
}

/// Write validated records as a pretty JSON array. Creates parent directories.
pub fn save_tickers(path: &Path, tickers: &[Ticker]) -> Result<(), LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(tickers).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)
}
