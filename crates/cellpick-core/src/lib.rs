#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and logging for cellpick.
//!
//! # Role in cellpick
//! `cellpick-core` is the input layer. It owns the coordinate types used for
//! hit testing and the normalized pointer events that the selection widgets
//! consume. It has no knowledge of grids or selection state.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Rect`] with closed-interval intersection,
//!   drag-rectangle normalization, and explicit viewport/surface conversion.
//! - **Event**: [`event::PointerEvent`] gestures (down, move, up, cancel).
//! - **Logging**: `tracing` macros or zero-cost no-ops, by feature.

pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
