// File logging for the TUI.
// Writes tracing output to a timestamped file since stdout belongs to the terminal UI.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Log files older than this are removed at startup.
pub const LOG_RETENTION: Duration = Duration::from_secs(24 * 3600);

/// Remove `.log` files in `dir` older than `retention`. Returns how many were removed.
pub fn cleanup_old_logs(dir: &Path, retention: Duration) -> io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }

        let expired = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > retention);

        if expired && fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }

    Ok(removed)
}

/// Install the global subscriber. `RUST_LOG` overrides `level`.
pub fn init(dir: &Path, level: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let removed = cleanup_old_logs(dir, LOG_RETENTION)?;

    let filename = format!(
        "ainav_{}.log",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = dir.join(filename);
    let log_file = File::create(&log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    tracing::info!(path = %log_path.display(), level, "logging initialized");
    if removed > 0 {
        tracing::info!(removed, "cleaned up old log files");
    }

    Ok(log_path)
}
