//! Structured logging for strata.
//!
//! Console output with uptime timestamps and module paths, plus an optional
//! plain-text log file. The level comes from `RUST_LOG` when set, otherwise
//! from the configuration.

use std::path::{Path, PathBuf};

use strata_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the log file written inside the log directory.
pub const LOG_FILE_NAME: &str = "strata.log";

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `log_dir` - Directory for the log file
/// * `file_logging` - Whether to write the log file at all
/// * `config` - Optional configuration to take the log level from
///
/// A log directory that cannot be created only disables file output.
pub fn init_logging(log_dir: Option<&Path>, file_logging: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_string(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if file_logging
        && let Some(log_dir) = log_dir
        && let Ok(log_file) = create_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime());

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The filter directive string for `config`, falling back to [`DEFAULT_FILTER`].
pub fn filter_string(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Path of the log file inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

fn create_log_file(log_dir: &Path) -> std::io::Result<std::fs::File> {
    std::fs::create_dir_all(log_dir)?;
    std::fs::File::create(log_file_path(log_dir))
}
