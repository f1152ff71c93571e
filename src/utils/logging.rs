//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_level`. A subscriber that is
/// already installed is left in place.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
