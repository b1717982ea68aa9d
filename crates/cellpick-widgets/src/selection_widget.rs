#![forbid(unsafe_code)]

//! The selection widget host.
//!
//! [`SelectionWidget`] owns the grid, the shape and command fields, both
//! controllers, and the record of which cell a gesture started on. Hosts
//! feed it [`GridEvent`]s in arrival order and draw [`SelectionWidget::view`].
//!
//! # Pointer routing
//!
//! | Event | Target | Action |
//! |-------|--------|--------|
//! | Down (primary) | Backdrop, Cell | Start drag |
//! | Down | ShapeInput, CommandInput | Ignored, text entry keeps focus |
//! | Down (other buttons) | any | Ignored |
//! | Move | any | Update drag |
//! | Up (primary) | same cell as press, travel within threshold | Cancel drag, toggle cell |
//! | Up (primary) | otherwise | Commit drag; same-cell click suppressed |
//! | Cancel | any | Cancel drag, highlights discarded |
//!
//! Errors never cross this boundary: refused gestures, out-of-range indices
//! and malformed descriptors are logged and reported in [`EventOutcome`].

use cellpick_core::event::{PointerButton, PointerEvent, PointerEventKind};
use cellpick_core::{debug, trace, warn};

use crate::click::{CellClickController, ClickOutcome, DEFAULT_CLICK_THRESHOLD};
use crate::drag_select::{
    DragCancelReason, DragSelectController, DragSelectError, DragSelectTransition, DragSession,
};
use crate::grid::{CellIndex, SelectionGrid};
use crate::input::{ShapeField, TextField};
use crate::layout::GridSurface;
use crate::shape::{GridShape, ShapeError};
use crate::view::GridView;

/// Descriptor used when none is configured.
pub const DEFAULT_SHAPE: &str = "(3,4)";

/// Largest grid a descriptor may produce by default.
pub const DEFAULT_MAX_CELLS: usize = 65_536;

// ---------------------------------------------------------------------------
// SelectionConfig
// ---------------------------------------------------------------------------

/// Configuration for the selection widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Descriptor applied at construction (default: `(3,4)`).
    pub initial_shape: String,
    /// Descriptors with more cells are rejected (default: 65 536).
    pub max_cells: usize,
    /// Travel above which a same-cell release is a drag (default: 3).
    pub click_threshold: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            initial_shape: DEFAULT_SHAPE.to_string(),
            max_cells: DEFAULT_MAX_CELLS,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
        }
    }
}

impl SelectionConfig {
    /// Start from a different descriptor.
    #[must_use]
    pub fn with_initial_shape(mut self, descriptor: impl Into<String>) -> Self {
        self.initial_shape = descriptor.into();
        self
    }

    /// Set the cell limit.
    #[must_use]
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Set the click travel threshold.
    #[must_use]
    pub fn with_click_threshold(mut self, threshold: u32) -> Self {
        self.click_threshold = threshold;
        self
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// What a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridTarget {
    /// The grid container outside any cell.
    Backdrop,
    Cell(CellIndex),
    ShapeInput,
    CommandInput,
}

/// Input to [`SelectionWidget::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    Pointer {
        event: PointerEvent,
        target: GridTarget,
    },
    /// New shape descriptor text.
    ShapeChanged(String),
    /// New command text.
    CommandChanged(String),
    /// A click delivered without a pointer gesture.
    Click(CellIndex),
}

impl GridEvent {
    /// Pointer event over a target.
    #[must_use]
    pub const fn pointer(event: PointerEvent, target: GridTarget) -> Self {
        Self::Pointer { event, target }
    }
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing changed.
    Ignored,
    /// The drag controller stepped.
    Drag(DragSelectTransition),
    /// A pointer-down was refused because another drag is active.
    DragRefused(DragSelectError),
    /// A gesture ended, possibly resolving to a click.
    Released {
        drag: DragSelectTransition,
        click: Option<ClickOutcome>,
    },
    Click(ClickOutcome),
    /// A valid descriptor was committed; `reset` is false when the shape
    /// matched the current one.
    ShapeApplied { shape: GridShape, reset: bool },
    ShapeRejected(ShapeError),
    CommandUpdated,
}

// ---------------------------------------------------------------------------
// SelectionWidget
// ---------------------------------------------------------------------------

/// A grid of selectable cells driven by clicks and rubber-band drags.
#[derive(Debug)]
pub struct SelectionWidget {
    config: SelectionConfig,
    grid: SelectionGrid,
    shape_field: ShapeField,
    command: TextField,
    drag: DragSelectController,
    click: CellClickController,
    /// Cell under the pointer-down of the active gesture.
    pressed: Option<CellIndex>,
}

impl Default for SelectionWidget {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl SelectionWidget {
    /// Create a widget. An unusable `initial_shape` yields an empty grid with
    /// the shape field marked invalid.
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        let mut shape_field = ShapeField::new(config.initial_shape.clone(), config.max_cells);
        let shape = shape_field.commit().unwrap_or_else(|err| {
            warn!(error = %err, "initial shape rejected");
            GridShape::default()
        });
        debug!(%shape, "selection widget created");
        Self {
            grid: SelectionGrid::new(shape),
            shape_field,
            command: TextField::new(),
            drag: DragSelectController::new(),
            click: CellClickController::new(config.click_threshold),
            pressed: None,
            config,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Current selection state.
    #[must_use]
    pub fn grid(&self) -> &SelectionGrid {
        &self.grid
    }

    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.grid.shape()
    }

    /// True when the last shape descriptor failed to parse.
    #[must_use]
    pub fn is_shape_invalid(&self) -> bool {
        self.shape_field.is_invalid()
    }

    #[must_use]
    pub fn shape_field(&self) -> &ShapeField {
        &self.shape_field
    }

    /// Command field text.
    #[must_use]
    pub fn command(&self) -> &str {
        self.command.value()
    }

    #[must_use]
    pub fn drag(&self) -> &DragSelectController {
        &self.drag
    }

    /// True while a drag gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // --- Event handling ---

    /// Process one event.
    pub fn handle_event(&mut self, event: &GridEvent, surface: &impl GridSurface) -> EventOutcome {
        match event {
            GridEvent::Pointer { event, target } => self.handle_pointer(event, *target, surface),
            GridEvent::ShapeChanged(text) => self.apply_shape(text),
            GridEvent::CommandChanged(text) => {
                self.command.set_value(text.as_str());
                EventOutcome::CommandUpdated
            }
            GridEvent::Click(index) => {
                EventOutcome::Click(self.click.on_cell_click(&mut self.grid, *index, None))
            }
        }
    }

    fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        target: GridTarget,
        surface: &impl GridSurface,
    ) -> EventOutcome {
        match event.kind {
            PointerEventKind::Down(PointerButton::Primary) => {
                self.pointer_down(event, target, surface)
            }
            PointerEventKind::Move => EventOutcome::Drag(self.drag.on_pointer_move(
                event.pointer_id,
                event.position,
                &mut self.grid,
                surface,
            )),
            PointerEventKind::Up(PointerButton::Primary) => self.pointer_up(event, target),
            PointerEventKind::Cancel => {
                self.pressed = None;
                EventOutcome::Drag(self.drag.cancel(DragCancelReason::CaptureLost, &mut self.grid))
            }
            PointerEventKind::Down(_) | PointerEventKind::Up(_) => EventOutcome::Ignored,
        }
    }

    fn pointer_down(
        &mut self,
        event: &PointerEvent,
        target: GridTarget,
        surface: &impl GridSurface,
    ) -> EventOutcome {
        let pressed = match target {
            GridTarget::Backdrop => None,
            GridTarget::Cell(index) => Some(index),
            GridTarget::ShapeInput | GridTarget::CommandInput => {
                trace!(?target, "pointer-down on text input ignored");
                return EventOutcome::Ignored;
            }
        };
        let capture = surface.capture_pointer(event.pointer_id);
        match self
            .drag
            .on_pointer_down(event.pointer_id, event.position, capture)
        {
            Ok(transition) => {
                self.pressed = pressed;
                EventOutcome::Drag(transition)
            }
            Err(err) => EventOutcome::DragRefused(err),
        }
    }

    fn pointer_up(&mut self, event: &PointerEvent, target: GridTarget) -> EventOutcome {
        let pointer_id = event.pointer_id;
        let Some(travel) = self
            .drag
            .session()
            .filter(|session| session.pointer_id() == pointer_id)
            .map(DragSession::travel)
        else {
            return EventOutcome::Drag(self.drag.on_pointer_up(pointer_id, &mut self.grid));
        };

        let pressed = self.pressed.take();
        let same_cell = match target {
            GridTarget::Cell(index) if pressed == Some(index) => Some(index),
            _ => None,
        };

        match same_cell {
            Some(index) if self.click.is_click(travel) => {
                let drag = self
                    .drag
                    .cancel(DragCancelReason::ResolvedAsClick, &mut self.grid);
                let click = self
                    .click
                    .on_cell_click(&mut self.grid, index, Some(travel));
                EventOutcome::Released {
                    drag,
                    click: Some(click),
                }
            }
            _ => {
                let drag = self.drag.on_pointer_up(pointer_id, &mut self.grid);
                let click = same_cell
                    .map(|index| self.click.on_cell_click(&mut self.grid, index, Some(travel)));
                EventOutcome::Released { drag, click }
            }
        }
    }

    fn apply_shape(&mut self, text: &str) -> EventOutcome {
        match self.shape_field.set_value(text) {
            Ok(shape) if shape == self.grid.shape() => {
                debug!(%shape, "shape unchanged; selection kept");
                EventOutcome::ShapeApplied {
                    shape,
                    reset: false,
                }
            }
            Ok(shape) => {
                self.drag
                    .cancel(DragCancelReason::ShapeChanged, &mut self.grid);
                self.pressed = None;
                self.grid.reset(shape);
                debug!(%shape, cells = self.grid.len(), "grid reset");
                EventOutcome::ShapeApplied { shape, reset: true }
            }
            Err(err) => {
                debug!(error = %err, "shape descriptor rejected");
                EventOutcome::ShapeRejected(err)
            }
        }
    }

    /// Cancel any active drag. Called automatically on drop.
    pub fn teardown(&mut self) -> Option<DragSelectTransition> {
        self.pressed = None;
        self.drag
            .is_dragging()
            .then(|| self.drag.cancel(DragCancelReason::Teardown, &mut self.grid))
    }

    // --- Rendering ---

    /// Project the current state for rendering.
    #[must_use]
    pub fn view(&self) -> GridView {
        let mut view = GridView::project(&self.grid);
        view.overlay = self.drag.overlay();
        view.shape_text = self.shape_field.value().to_string();
        view.shape_invalid = self.shape_field.is_invalid();
        view.command_text = self.command.value().to_string();
        view
    }
}

impl Drop for SelectionWidget {
    fn drop(&mut self) {
        self.teardown();
    }
}
