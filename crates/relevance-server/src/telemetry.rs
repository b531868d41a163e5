//! Tracing subscriber setup for the server binary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use relevance::config::{Config, LogFormat};

/// Installs the global subscriber. Keep the returned guard alive for the life
/// of the process or buffered file output is lost.
pub fn init_tracing(config: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = build_env_filter(&config.log_level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match &config.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);

            match config.log_format {
                LogFormat::Text => registry.with(layer).try_init()?,
                LogFormat::Json => registry.with(layer.json()).try_init()?,
            }
            Ok(Some(guard))
        }
        None => {
            let layer = tracing_subscriber::fmt::layer();
            match config.log_format {
                LogFormat::Text => registry.with(layer).try_init()?,
                LogFormat::Json => registry.with(layer.json()).try_init()?,
            }
            Ok(None)
        }
    }
}

/// `RUST_LOG` wins; otherwise `fallback` (e.g. `info` or `relevance=debug`).
pub fn build_env_filter(fallback: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("invalid log level directive '{fallback}'")),
    }
}

/// Splits a log file path into directory (defaulting to `.`) and file name.
pub fn split_log_path(path: &Path) -> anyhow::Result<(PathBuf, OsString)> {
    let file_name = path
        .file_name()
        .map(OsString::from)
        .with_context(|| format!("log file path {} has no file name", path.display()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((dir, file_name))
}
