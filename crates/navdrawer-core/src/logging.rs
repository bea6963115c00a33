#![forbid(unsafe_code)]

//! Logging bootstrap and tracing re-exports.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported so
//! downstream crates can log through `navdrawer_core::debug!` and friends.
//! With `tracing-json` a JSON subscriber filtered by `RUST_LOG` can be
//! installed once per process.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "navdrawer=info";

/// Install a JSON `tracing` subscriber.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
