//! Tracing setup: human-readable stderr output plus a daily rolling log file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "tray_recorder=debug,tray_recorder_core=debug";
const LOG_FILE_PREFIX: &str = "tray-recorder.log";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. When `log_dir` is given, output
/// is also written to a daily rolling file there; keep the returned guard
/// alive until exit so buffered lines are flushed.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_filter(filter());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .init();

            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(stderr_layer).init();
            None
        }
    }
}
