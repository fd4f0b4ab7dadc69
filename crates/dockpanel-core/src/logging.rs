#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros. Without it, the crate root exports macros of the same names that
//! expand to nothing (spans expand to [`NoopSpan`]), so call sites never need
//! their own `cfg` gates.
//!
//! ```ignore
//! use dockpanel_core::{debug, debug_span};
//!
//! let _span = debug_span!("stack_panel_layout", children = 3).entered();
//! debug!(reserved = 8.0, "splitters reserved");
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Stand-in for `tracing::Span` when the `tracing` feature is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

impl NoopSpan {
    /// Mirror of `Span::entered`; returns the span itself as the guard.
    #[inline]
    #[must_use]
    pub fn entered(self) -> Self {
        self
    }

    /// Mirror of `Span::in_scope`.
    #[inline]
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        f()
    }
}

/// Install a global `fmt` subscriber that writes JSON lines to stderr.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Returns `false`
/// if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! error_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}

#[cfg(all(test, not(feature = "tracing")))]
mod tests {
    use super::NoopSpan;

    #[test]
    fn noop_macros_accept_tracing_syntax() {
        let value = 3;
        crate::debug!(value, name = "x", "message {}", value);
        crate::warn!("plain message");
        let span = crate::debug_span!("span", field = value).entered();
        assert_eq!(span.in_scope(|| value + 1), 4);
    }

    #[test]
    fn noop_span_is_default_constructible() {
        let span = NoopSpan::default();
        assert_eq!(span.entered().in_scope(|| "ok"), "ok");
    }
}
