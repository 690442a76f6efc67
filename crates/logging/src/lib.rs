//! SymMerkle Logging
//!
//! Shared `tracing` subscriber setup for SymMerkle binaries. Libraries only
//! emit events; installing a subscriber is left to the binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when neither `RUST_LOG` nor an explicit filter is given.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,symmerkle=debug"
    } else {
        "warn,symmerkle=info"
    }
}

/// Resolve the filter: `RUST_LOG` first, then `configured`, then the default.
pub fn build_filter(verbose: bool, configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| match configured {
            Some(directives) => EnvFilter::try_new(directives),
            None => EnvFilter::try_new(default_filter(verbose)),
        })
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)))
}

/// Install the global subscriber, writing to stderr.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(verbose: bool, configured: Option<&str>) {
    let filter = build_filter(verbose, configured);

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
