//! Application configuration, read from TOML.
//!
//! Looked up at `<config_dir>/tickergrid/config.toml`; a missing file means
//! defaults. Command-line flags override individual fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::SAMPLE_SEED;
use crate::schema::RenderOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Portfolio JSON file; the sample portfolio is used when unset.
    pub data_path: Option<PathBuf>,
    /// Trailing points shown in the sparkline column.
    pub sparkline_width: usize,
    /// UI event poll interval.
    pub tick_rate_ms: u64,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Seed for the sample portfolio.
    pub sample_seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            sparkline_width: 30,
            tick_rate_ms: 50,
            log_level: "info".to_string(),
            sample_seed: SAMPLE_SEED,
        }
    }
}

impl AppConfig {
    /// `<config_dir>/tickergrid/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tickergrid").join("config.toml"))
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from the explicit path if given, else the default location.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            sparkline_width: self.sparkline_width,
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
