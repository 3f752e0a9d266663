//! Subscriber setup for the binaries.
//!
//! The library only emits `tracing` events and stays silent unless the host
//! installs a subscriber. Binaries call `init` once; output goes to stderr so
//! stdout is left for command results.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default for the `tax-client` binary. The client's own failure events are
/// off because the binary already prints the returned error once.
pub const CLI_FILTER: &str = "info,tax_client::client=off";

/// Filter from `RUST_LOG`, falling back to `default` when unset or invalid.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install a global stderr subscriber filtered by `RUST_LOG`, or `default`
/// when it is unset. Returns an error if a subscriber is already set.
pub fn init(default: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
}
