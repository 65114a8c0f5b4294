// Per-session log pipeline

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::downloader::errors::DownloadError;
use crate::downloader::utils::ensure_dir;

const STAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");

/// Timestamped per-run log file path under `logs_dir`.
fn session_log_path(logs_dir: &Path) -> PathBuf {
    let stamp = OffsetDateTime::now_utc()
        .format(&STAMP_FORMAT)
        .unwrap_or_else(|_| "session".to_string());
    logs_dir.join(format!("{}_session.log", stamp))
}

/// Set up logging for this session: the full DEBUG trail goes into one
/// timestamped file, only warnings and errors reach the terminal so the
/// interactive prompts stay readable. Built exactly once per process;
/// one process is one session, so no handler ever attaches twice.
pub fn init_session_log(logs_dir: &Path) -> Result<PathBuf, DownloadError> {
    ensure_dir(logs_dir)?;

    let path = session_log_path(logs_dir);
    let file = File::create(&path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(LevelFilter::WARN),
        )
        .init();

    Ok(path)
}
