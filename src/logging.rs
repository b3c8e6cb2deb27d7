//! Diagnostic logging for the binary.
//!
//! Reports go to stdout; tracing events go to stderr so they never mix with
//! output a caller might parse (`extract --json`).

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "autoglot=debug";

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// Calling this more than once is harmless: later calls leave the first subscriber in place.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
