//! Logging initialization.
//!
//! The program alternates between full-screen TUI sessions and plain
//! line-mode output, so logs go to files instead of the terminal. Each run
//! writes to its own timestamped file under `logs/` next to the
//! executable. `RUST_LOG` controls the level (default `info`).

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up file-based logging for this run. Failures are reported on stderr
/// and leave the program running without logging; they are never fatal.
pub fn init_logging() {
    let log_dir = match std::env::current_exe() {
        Ok(exe_path) => exe_path
            .parent()
            .map(|p| p.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs")),
        Err(_) => PathBuf::from("logs"),
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: failed to create logs directory: {e}");
        return;
    }

    // One file per run, e.g. logs/chatscope.2025-08-31-14-30-25.log
    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_path = log_dir.join(format!("chatscope.{timestamp}.log"));
    let log_file = match fs::File::create(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: failed to create log file: {e}");
            return;
        }
    };

    // Non-blocking writer so logging never stalls a draw cycle.
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry().with(env_filter).with(file_layer).init();

    // Keep the writer alive for the whole program lifetime.
    std::mem::forget(guard);

    tracing::info!("logging initialized, writing to {}", log_path.display());
}
