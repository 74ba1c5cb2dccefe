//! File-based logging initialization

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{DashboardConfig, DEFAULT_LOG_FILTER};

/// File name prefix of the daily log files.
pub const LOG_FILE_PREFIX: &str = "dashboard.log";

/// Initialize the logging system
///
/// Sets up:
/// - Daily rotating log file `<log_dir>/dashboard.log.YYYY-MM-DD`
/// - Non-blocking file writes
/// - Optional compact console output on stderr
///
/// The filter comes from `RUST_LOG`, falling back to the configured filter.
/// If the log directory cannot be created, only the console layer (when
/// requested) is installed.
///
/// The returned guard flushes pending file writes on drop; keep it alive for
/// the lifetime of the program.
pub fn init(config: &DashboardConfig, console: bool) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let (file_layer, guard) = match fs::create_dir_all(&config.log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false); // No ANSI codes in log files
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!(
                "Warning: Failed to create log directory {}: {}",
                config.log_dir.display(),
                e
            );
            (None, None)
        }
    };

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: Logging already initialized: {}", e);
        return None;
    }

    tracing::info!(
        log_dir = %config.log_dir.display(),
        log_filter = %config.log_filter,
        file_logging = guard.is_some(),
        console,
        "Logging initialized"
    );

    guard
}
