//! Structured logging setup.
//!
//! `tracing` is configured once from [`LoggingConfig`]. Output goes to
//! stdout, or is appended to `file_path` when one is configured.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Env var forcing JSON output regardless of config.
pub const JSON_ENV: &str = "CYCLONE_LOG_JSON";

/// Initialise the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let json_logging = cfg.json || std::env::var(JSON_ENV).is_ok();
    let (writer, ansi) = log_writer(cfg)?;

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .init();
    }

    Ok(())
}

/// Writer for log output, plus whether ANSI colours suit it.
///
/// A configured file is opened for append; missing parent directories
/// are created.
pub fn log_writer(cfg: &LoggingConfig) -> Result<(BoxMakeWriter, bool)> {
    let Some(path) = &cfg.file_path else {
        return Ok((BoxMakeWriter::new(std::io::stdout), true));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    Ok((BoxMakeWriter::new(Mutex::new(file)), false))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
