//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from
//! `BUZZPAY_LOG` (same syntax as `RUST_LOG`), defaulting to `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "BUZZPAY_LOG";

/// Whether the user asked for diagnostics explicitly
pub fn log_env_set() -> bool {
    std::env::var(LOG_ENV).map_or(false, |v| !v.trim().is_empty())
}

/// Install the global subscriber
///
/// `verbose` raises the default level to `debug`; an explicit `BUZZPAY_LOG`
/// always wins. Calling this twice is harmless.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,buzzpay=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
