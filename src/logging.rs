//! Logging setup for the REPL.
//!
//! Logs go to stderr so they never interleave with command output on stdout.
//! Set `DEBUG_LOGGING=1` to see widget transitions, or `RUST_LOG` for full
//! control.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug_logging {
            EnvFilter::new("warn,ringbar=debug,ringbar_core=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
