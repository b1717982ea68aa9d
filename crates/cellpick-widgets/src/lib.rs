#![forbid(unsafe_code)]

//! Selection widgets for cellpick.
//!
//! The pieces compose bottom-up: [`shape`] turns descriptor text into a
//! [`GridShape`], [`grid`] holds the per-cell flags, [`drag_select`] and
//! [`click`] mutate them from pointer input, and [`selection_widget`] routes
//! host events to the right controller. [`layout`] is the boundary to the
//! renderer and [`view`] is what the renderer draws.

pub mod click;
pub mod drag_select;
pub mod grid;
pub mod input;
pub mod layout;
pub mod selection_widget;
pub mod shape;
pub mod view;

pub use click::{CellClickController, ClickOutcome};
pub use drag_select::{
    DragCancelReason, DragSelectController, DragSelectEffect, DragSelectError,
    DragSelectNoopReason, DragSelectState, DragSelectTransition, DragSession, PointerCapture,
};
pub use grid::{Cell, CellFlags, CellIndex, GridError, SelectionGrid};
pub use input::{ShapeField, TextField};
pub use layout::{GridSurface, UniformGridLayout};
pub use selection_widget::{
    EventOutcome, GridEvent, GridTarget, SelectionConfig, SelectionWidget,
};
pub use shape::{GridShape, ShapeError, parse, parse_shape, parse_shape_with_limit, validate};
pub use view::{CellVisual, GridView};
