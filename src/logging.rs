use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Name of the log file, written to the current working directory.
const LOG_FILE: &str = "mazeloom.log";

/// Install the global tracing subscriber.
///
/// The terminal belongs to the maze while the app runs, so diagnostics go
/// to a non-blocking file appender instead of stdout. The returned guard
/// must stay alive for buffered lines to be flushed; hold it in main.
/// The level is set through `RUST_LOG` and defaults to `info`.
pub fn init() -> WorkerGuard {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}
