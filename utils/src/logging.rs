//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Human,
    /// One JSON object per line, for log shippers.
    Json,
}

/// Initialize the tracing subscriber in human format.
///
/// Respects the `RUST_LOG` environment variable for filtering.
///
/// # Panics
/// Panics if a global subscriber is already set. Tests should prefer
/// [`try_init_tracing`].
pub fn init_tracing() {
    init_tracing_with(LogFormat::Human);
}

/// Initialize the tracing subscriber with an explicit output format.
pub fn init_tracing_with(format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match format {
        LogFormat::Human => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Fallible initialization for tests, where several suites may race to
/// install the subscriber. Returns whether this call installed it.
pub fn try_init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
