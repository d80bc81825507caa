//! Logging Infrastructure
//!
//! Structured logging via `tracing`, console by default, daily-rolling
//! files when a log directory is configured.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "event_server=info,tower_http=info";

/// Build the env filter: explicit level, then `RUST_LOG`, then the default.
fn build_filter(log_level: Option<&str>) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    resolve_filter(log_level, rust_log.as_deref())
}

fn resolve_filter(log_level: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    [log_level, rust_log]
        .into_iter()
        .flatten()
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the global subscriber
pub fn init_logger(log_level: Option<&str>, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "event-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("LOG_DIR {dir} is not a directory, logging to stdout");
    }

    subscriber.init();
}
