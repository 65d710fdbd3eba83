#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! Re-exports the tracing macros when the `tracing` feature is enabled.
//! Without the feature, no-op macros with the same names are exported at the
//! crate root so call sites compile unchanged.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
