use crate::types::LogLevel;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber; `RUST_LOG` takes precedence over `level`.
///
/// Safe to call more than once: later calls are ignored.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
