// src/logging.rs
// =============================================================================
// Sends the crawl log to a file instead of the terminal.
//
// The terminal is reserved for the result listing; everything else (crawl
// start, per-worker debug lines, failed requests) is appended to the log
// file. RUST_LOG overrides the default filter, e.g.
//
//   RUST_LOG=site_crawler=trace site-crawler https://example.com
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "site_crawler=debug,info";

/// Installs the global subscriber writing to `log_file`.
///
/// Log lines are written by a background thread; keep the returned guard
/// alive until the program is done or the last lines may be lost.
pub fn init_logging(log_file: &Path) -> Result<WorkerGuard> {
    let file_name = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("log file path '{}' has no usable file name", log_file.display()))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    // Rotation::NEVER appends to the same file on every run
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}
