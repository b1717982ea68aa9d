#![forbid(unsafe_code)]

//! cellpick public facade crate.
//!
//! Re-exports the types a host needs to embed the selection widget and
//! offers a prelude for day-to-day usage.
//!
//! ```
//! use cellpick::prelude::*;
//!
//! let mut widget = SelectionWidget::new(SelectionConfig::default().with_initial_shape("(2,2)"));
//! let surface = UniformGridLayout::new(widget.shape()).with_cell_size(10, 10).with_gap(10);
//!
//! widget.handle_event(&GridEvent::pointer(PointerEvent::down(0, 0), GridTarget::Backdrop), &surface);
//! widget.handle_event(&GridEvent::pointer(PointerEvent::moved(25, 5), GridTarget::Backdrop), &surface);
//! widget.handle_event(&GridEvent::pointer(PointerEvent::up(25, 5), GridTarget::Backdrop), &surface);
//!
//! assert_eq!(widget.view().to_string(), "##\n..");
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cellpick_core::event::{PointerButton, PointerEvent, PointerEventKind};
pub use cellpick_core::geometry::{Point, Rect, SurfaceSpace};
#[cfg(feature = "tracing-json")]
pub use cellpick_core::logging::init_json_subscriber;

// --- Widget re-exports -----------------------------------------------------

pub use cellpick_widgets::{
    CellClickController, CellIndex, CellVisual, ClickOutcome, DragCancelReason,
    DragSelectController, DragSelectEffect, DragSelectError, DragSelectState,
    DragSelectTransition, EventOutcome, GridError, GridEvent, GridShape, GridSurface, GridTarget,
    GridView, PointerCapture, SelectionConfig, SelectionGrid, SelectionWidget, ShapeError,
    ShapeField, TextField, UniformGridLayout, parse, parse_shape, validate,
};

// --- Errors ---------------------------------------------------------------

/// Any error a cellpick component can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Shape(ShapeError),
    Grid(GridError),
    Drag(DragSelectError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(err) => write!(f, "{err}"),
            Self::Grid(err) => write!(f, "{err}"),
            Self::Drag(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shape(err) => Some(err),
            Self::Grid(err) => Some(err),
            Self::Drag(err) => Some(err),
        }
    }
}

impl From<ShapeError> for Error {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<DragSelectError> for Error {
    fn from(err: DragSelectError) -> Self {
        Self::Drag(err)
    }
}

/// Standard result type for cellpick APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CellIndex, Error, EventOutcome, GridEvent, GridShape, GridSurface, GridTarget, GridView,
        Point, PointerEvent, Rect, Result, SelectionConfig, SelectionGrid, SelectionWidget,
        UniformGridLayout,
    };

    pub use crate::{core, widgets};
}

pub use cellpick_core as core;
pub use cellpick_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;

    fn select_then_toggle(descriptor: &str, index: CellIndex) -> Result<bool> {
        let shape = parse_shape(descriptor)?;
        let mut grid = SelectionGrid::new(shape);
        Ok(grid.toggle_selected(index)?)
    }

    #[test]
    fn question_mark_lifts_component_errors() {
        assert_eq!(select_then_toggle("(2,2)", CellIndex::new(1, 1)), Ok(true));
        assert!(matches!(
            select_then_toggle("(2)", CellIndex::new(0, 0)),
            Err(Error::Shape(ShapeError::Malformed { .. }))
        ));
        assert!(matches!(
            select_then_toggle("(2,2)", CellIndex::new(2, 0)),
            Err(Error::Grid(GridError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn error_display_and_source_delegate() {
        use std::error::Error as _;

        let err = Error::from(DragSelectError::ConcurrentDrag {
            active_pointer: 1,
            refused_pointer: 2,
        });
        assert!(err.to_string().contains("pointer 2"));
        assert!(err.source().is_some());
    }
}
