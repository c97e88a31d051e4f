//! Tracing initialization for binaries and integration tests.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize console tracing with an environment-driven filter.
///
/// Respects `RUST_LOG`; defaults to `info` globally with `debug` for the
/// `fable` crates. Safe to call once per process.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fable=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
