//! Diagnostics logging for fxplore.
//!
//! Log events go to stderr so they never interleave with the listing on stdout.
//! The filter is read from the `FX_LOG` environment variable (tracing `EnvFilter` syntax)
//! and defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter, e.g. `FX_LOG=fxplore=debug`.
pub const LOG_ENV: &str = "FX_LOG";

pub(crate) const DEFAULT_FILTER: &str = "warn";

pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
