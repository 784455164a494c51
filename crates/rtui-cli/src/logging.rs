//! File logging. The terminal belongs to the UI, so log records only ever
//! go to a file.

use crate::types::LogLevel;
use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

pub fn init(path: &Path, level: LogLevel) -> Result<()> {
    if level == LogLevel::Off {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let config = ConfigBuilder::new()
        .add_filter_allow_str("rtui")
        .set_target_level(log::LevelFilter::Error)
        .build();

    WriteLogger::init(level.to_level_filter(), config, log_file)
        .context("Logger already initialized")?;

    log::info!("rtui {} started", env!("CARGO_PKG_VERSION"));
    Ok(())
}
