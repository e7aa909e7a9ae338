#![forbid(unsafe_code)]

//! Structured logging hooks.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here (and
//! at the crate root) so hosts can log through the same facade as the core.
//! Without it, the core logs nothing and pulls in no logging dependencies.
//!
//! The `tracing-json` feature adds [`init_json_logging`], a one-call JSON
//! subscriber for hosts that ship logs to a collector.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "hgrid_core=info";

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Falls back to [`DEFAULT_FILTER`] when `RUST_LOG` is unset or invalid.
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
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
