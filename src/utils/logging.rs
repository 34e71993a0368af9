//! Tracing setup for the binary
//!
//! Log events go to stderr; stdout carries only the user-facing status lines.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "audio_grab=warn";
pub const VERBOSE_FILTER: &str = "audio_grab=debug";

/// Directive used when `RUST_LOG` is not set
pub fn fallback_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over both defaults. Calling it again is a no-op.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
