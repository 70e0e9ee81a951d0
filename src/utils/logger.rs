//! Logging initialization and configuration.
//!
//! The library itself only emits `tracing` events; this helper installs a
//! subscriber for binaries and test harnesses that want to see them.
//!
//! # Configuration
//!
//! The log level can be controlled via the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - Show debug and higher level logs
//! - `RUST_LOG=info` - Show info and higher level logs (default)
//! - `RUST_LOG=warn` - Show warnings and errors only

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize a stderr logging subscriber.
///
/// Writes to stderr so captured command output on stdout stays clean. The
/// level defaults to `info` when `RUST_LOG` is not set. Safe to call more
/// than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("global tracing subscriber already installed");
    }
}
