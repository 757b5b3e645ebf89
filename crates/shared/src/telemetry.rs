//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs a global `tracing` subscriber writing to stdout.
///
/// The filter comes from `RUST_LOG` when set, otherwise `default_filter`
/// (for example `"tillbook=debug"`). Calling this more than once is harmless;
/// later calls leave the first subscriber in place and return `false`.
pub fn init_tracing(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(fmt::layer())
        .try_init()
        .is_ok()
}

/// Same as [`init_tracing`], but output goes through the test harness
/// capture so it only shows for failing tests.
pub fn init_test_tracing(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}
