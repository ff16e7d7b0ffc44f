use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The terminal belongs to the map, so logs only go to `--log-file`. With
/// no log file nothing is installed and events are dropped. The returned
/// guard flushes buffered lines when dropped; keep it alive for the whole
/// run.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>> {
    let Some(path) = &config.log_file else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    Ok(Some(guard))
}
