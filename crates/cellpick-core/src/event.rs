#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! The host input system (a DOM bridge, a terminal mouse decoder, a test
//! harness) translates its native events into [`PointerEvent`] values and
//! delivers them in arrival order. Positions are in surface space, see
//! [`crate::geometry::SurfaceSpace`].
//!
//! # Design Notes
//!
//! - A gesture is `Down`, any number of `Move`, then `Up` or `Cancel`.
//! - `Cancel` stands for lost pointer capture (window blur, capture stolen by
//!   another element, touch interrupted).
//! - `pointer_id` distinguishes simultaneous pointers; mouse input uses
//!   [`PointerEvent::MOUSE`].

use crate::geometry::Point;

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Position relative to the drag surface content origin.
    pub position: Point,

    /// Identifier of the pointer that produced the event.
    pub pointer_id: u32,
}

impl PointerEvent {
    /// Pointer id used for plain mouse input.
    pub const MOUSE: u32 = 1;

    /// Create a new mouse pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            pointer_id: Self::MOUSE,
        }
    }

    /// Primary-button press.
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    /// Pointer motion.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Primary-button release.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    /// Lost pointer capture.
    #[must_use]
    pub const fn cancel() -> Self {
        Self::new(PointerEventKind::Cancel, 0, 0)
    }

    /// Set the pointer id.
    #[must_use]
    pub const fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn xy(&self) -> (i32, i32) {
        (self.position.x, self.position.y)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Button released.
    Up(PointerButton),

    /// Pointer moved.
    Move,

    /// Pointer capture lost; the gesture is aborted.
    Cancel,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch.
    Primary,

    /// Right mouse button.
    Secondary,

    /// Middle mouse button (scroll wheel click).
    Auxiliary,
}
