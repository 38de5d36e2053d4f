//! File logging. The terminal belongs to the UI, so records go to a file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

/// `<data_local_dir>/tickergrid/tickergrid.log`, falling back to the working directory.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickergrid")
        .join("tickergrid.log")
}

/// Install the global logger, appending to `path`.
///
/// `RUST_LOG` wins over `default_level`.
pub fn init(path: &Path, default_level: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    log::info!("logging to {}", path.display());
    Ok(())
}
