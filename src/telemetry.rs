//! Development-time tracing setup.
//!
//! The engine itself only emits `tracing` events; installing a subscriber is
//! the embedding application's call. This helper covers the common case for
//! binaries and examples: `RUST_LOG`-driven filtering, compact output to
//! stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize a global tracing subscriber.
///
/// Reads `RUST_LOG`; defaults to `warn` if unset. Safe to call more than
/// once — later calls are no-ops if a subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
