#![forbid(unsafe_code)]

//! Core: geometry primitives and the logging facade shared by the dockpanel
//! crates.
//!
//! # Role in dockpanel
//! `dockpanel-core` carries the host-facing value types (`Size`, `Rect`,
//! `Orientation`) that a measure/arrange framework hands to the layout
//! engine, plus a logging facade that compiles to nothing unless the
//! `tracing` feature is on.

pub mod geometry;
pub mod logging;

pub use geometry::{Orientation, Rect, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
