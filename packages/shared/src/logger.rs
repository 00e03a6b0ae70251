//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the given binary name is
/// filtered at `default_level` and everything else at `warn`.
///
/// Safe to call more than once (later calls are no-ops), so test
/// fixtures can share it with the binary.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{}={level},roomcast_server={level},roomcast_shared={level}",
            bin_name.replace('-', "_"),
            level = default_level
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
