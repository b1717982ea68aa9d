#![forbid(unsafe_code)]

//! Rubber-band drag selection.
//!
//! [`DragSelectController`] turns a pointer gesture into highlight and
//! selection changes on a [`SelectionGrid`]:
//!
//! ```text
//! Idle --down--> Dragging --move*--> Dragging --up-----> Idle (commit)
//!                    \--------------------------cancel--> Idle (discard)
//! ```
//!
//! Every entry point returns a [`DragSelectTransition`] that records the
//! state before and after the event and the effect it had, so hosts and tests
//! can reason about the gesture without peeking at the grid.
//!
//! # Invariants
//!
//! 1. At most one [`DragSession`] exists per controller.
//! 2. While dragging, a cell is highlighted iff its bounds, converted to
//!    surface space, intersect the drag rectangle at the latest move.
//! 3. Leaving `Dragging` always clears every highlight: by committing it on
//!    release, or by discarding it on cancel.
//! 4. The [`PointerCapture`] held by a session is released exactly once,
//!    whichever way the session ends (release, cancel, refusal, or drop).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Second pointer-down while dragging | Multi-touch, stray press | [`DragSelectError::ConcurrentDrag`], new gesture refused |
//! | Move/up from another pointer | Multi-touch | `Noop { PointerMismatch }` |
//! | Move/up while idle | Late events after cancel | `Noop { IdleWithoutActiveDrag }` |
//! | Capture lost mid-drag | Blur, capture stolen | `cancel(CaptureLost)`, highlights discarded |
//! | Cell has no bounds | Not laid out yet | Cell is not highlighted |

use std::fmt;

use cellpick_core::geometry::{Point, Rect};
use cellpick_core::{debug, trace, trace_span, warn};

use crate::grid::{CellIndex, SelectionGrid};
use crate::layout::GridSurface;

// ---------------------------------------------------------------------------
// PointerCapture
// ---------------------------------------------------------------------------

/// Scoped ownership of a pointer's move/up routing.
///
/// Acquired at pointer-down and held by the [`DragSession`]. Dropping the
/// guard runs the release hook once.
pub struct PointerCapture {
    release: Option<Box<dyn FnOnce()>>,
}

impl PointerCapture {
    /// A capture with a release hook.
    #[must_use]
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A capture that holds nothing; for hosts that deliver moves globally.
    #[must_use]
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// True while a release hook is pending.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCapture")
            .field("attached", &self.is_attached())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DragSession
// ---------------------------------------------------------------------------

/// One in-progress drag gesture.
#[derive(Debug)]
pub struct DragSession {
    pointer_id: u32,
    anchor: Point,
    current: Point,
    rect: Rect,
    max_travel_sq: u64,
    capture: PointerCapture,
}

impl DragSession {
    fn new(pointer_id: u32, anchor: Point, capture: PointerCapture) -> Self {
        Self {
            pointer_id,
            anchor,
            current: anchor,
            rect: Rect::at(anchor),
            max_travel_sq: 0,
            capture,
        }
    }

    fn update(&mut self, position: Point) {
        self.current = position;
        self.rect = Rect::from_corners(self.anchor, position);
        self.max_travel_sq = self
            .max_travel_sq
            .max(self.anchor.distance_squared(position));
    }

    /// Pointer driving this gesture.
    #[must_use]
    pub const fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    /// Pointer-down position.
    #[must_use]
    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    /// Latest pointer position.
    #[must_use]
    pub const fn current(&self) -> Point {
        self.current
    }

    /// Normalized drag rectangle, in surface coordinates.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Farthest the pointer has been from the anchor, rounded down.
    #[must_use]
    pub fn travel(&self) -> u32 {
        u32::try_from(self.max_travel_sq.isqrt()).unwrap_or(u32::MAX)
    }

    /// Whether the session holds an attached pointer capture.
    #[must_use]
    pub fn has_capture(&self) -> bool {
        self.capture.is_attached()
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSelectState {
    Idle,
    Dragging {
        pointer_id: u32,
        anchor: Point,
        rect: Rect,
    },
}

/// Why an active drag was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCancelReason {
    /// The host lost pointer capture.
    CaptureLost,
    /// The widget is being torn down.
    Teardown,
    /// The grid is about to be reset to a new shape.
    ShapeChanged,
    /// The gesture stayed on one cell and is being handled as a click.
    ResolvedAsClick,
}

/// Explicit no-op diagnostics for events that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSelectNoopReason {
    IdleWithoutActiveDrag,
    PointerMismatch,
}

/// Effect of one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSelectEffect {
    Started {
        pointer_id: u32,
        anchor: Point,
    },
    Updated {
        pointer_id: u32,
        rect: Rect,
        highlighted: usize,
    },
    Committed {
        pointer_id: u32,
        rect: Rect,
        committed: usize,
        travel: u32,
    },
    Canceled {
        pointer_id: u32,
        reason: DragCancelReason,
        cleared: usize,
    },
    Noop {
        reason: DragSelectNoopReason,
    },
}

/// One state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSelectTransition {
    pub transition_id: u64,
    pub from: DragSelectState,
    pub to: DragSelectState,
    pub effect: DragSelectEffect,
}

/// Refused gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSelectError {
    /// A pointer-down arrived while another drag is active.
    ConcurrentDrag {
        active_pointer: u32,
        refused_pointer: u32,
    },
}

impl fmt::Display for DragSelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConcurrentDrag {
                active_pointer,
                refused_pointer,
            } => write!(
                f,
                "pointer {refused_pointer} cannot start a drag while pointer {active_pointer} is dragging"
            ),
        }
    }
}

impl std::error::Error for DragSelectError {}

// ---------------------------------------------------------------------------
// DragSelectController
// ---------------------------------------------------------------------------

/// Drives one drag gesture at a time against a [`SelectionGrid`].
#[derive(Debug, Default)]
pub struct DragSelectController {
    session: Option<DragSession>,
    transition_counter: u64,
}

impl DragSelectController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DragSelectState {
        match &self.session {
            None => DragSelectState::Idle,
            Some(session) => DragSelectState::Dragging {
                pointer_id: session.pointer_id,
                anchor: session.anchor,
                rect: session.rect,
            },
        }
    }

    /// True while a gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// The drag rectangle to draw, in surface coordinates.
    #[must_use]
    pub fn overlay(&self) -> Option<Rect> {
        self.session.as_ref().map(DragSession::rect)
    }

    /// Begin a gesture at `origin`.
    ///
    /// The overlay starts as a zero-size rectangle at the press position. If
    /// a gesture is already active the new one is refused and `capture` is
    /// released immediately.
    pub fn on_pointer_down(
        &mut self,
        pointer_id: u32,
        origin: Point,
        capture: PointerCapture,
    ) -> Result<DragSelectTransition, DragSelectError> {
        if let Some(active) = &self.session {
            let err = DragSelectError::ConcurrentDrag {
                active_pointer: active.pointer_id,
                refused_pointer: pointer_id,
            };
            warn!(
                active_pointer = active.pointer_id,
                refused_pointer = pointer_id,
                "refusing concurrent drag"
            );
            return Err(err);
        }

        let from = self.state();
        self.session = Some(DragSession::new(pointer_id, origin, capture));
        debug!(pointer_id, x = origin.x, y = origin.y, "drag started");
        Ok(self.transition(
            from,
            DragSelectEffect::Started {
                pointer_id,
                anchor: origin,
            },
        ))
    }

    /// Track the pointer and re-evaluate every cell's highlight.
    pub fn on_pointer_move(
        &mut self,
        pointer_id: u32,
        position: Point,
        grid: &mut SelectionGrid,
        surface: &impl GridSurface,
    ) -> DragSelectTransition {
        let from = self.state();
        if let Err(reason) = self.check_owner(pointer_id) {
            return self.noop(from, reason);
        }
        let Some(session) = self.session.as_mut() else {
            return self.noop(from, DragSelectNoopReason::IdleWithoutActiveDrag);
        };

        session.update(position);
        let rect = session.rect;
        let highlighted = highlight_pass(rect, grid, surface);
        self.transition(
            from,
            DragSelectEffect::Updated {
                pointer_id,
                rect,
                highlighted,
            },
        )
    }

    /// End the gesture and commit the highlight to the selection.
    pub fn on_pointer_up(
        &mut self,
        pointer_id: u32,
        grid: &mut SelectionGrid,
    ) -> DragSelectTransition {
        let from = self.state();
        if let Err(reason) = self.check_owner(pointer_id) {
            return self.noop(from, reason);
        }
        let Some(session) = self.session.take() else {
            return self.noop(from, DragSelectNoopReason::IdleWithoutActiveDrag);
        };
        let committed = grid.commit_highlight_to_selection();
        let travel = session.travel();
        let rect = session.rect;
        drop(session);
        debug!(pointer_id, committed, travel, "drag committed");
        self.transition(
            from,
            DragSelectEffect::Committed {
                pointer_id,
                rect,
                committed,
                travel,
            },
        )
    }

    /// Abort the active gesture, discarding its highlight.
    pub fn cancel(
        &mut self,
        reason: DragCancelReason,
        grid: &mut SelectionGrid,
    ) -> DragSelectTransition {
        let from = self.state();
        let Some(session) = self.session.take() else {
            return self.noop(from, DragSelectNoopReason::IdleWithoutActiveDrag);
        };
        let cleared = grid.clear_highlights();
        let pointer_id = session.pointer_id;
        drop(session);
        debug!(pointer_id, ?reason, cleared, "drag canceled");
        self.transition(
            from,
            DragSelectEffect::Canceled {
                pointer_id,
                reason,
                cleared,
            },
        )
    }

    fn check_owner(&self, pointer_id: u32) -> Result<(), DragSelectNoopReason> {
        match &self.session {
            None => Err(DragSelectNoopReason::IdleWithoutActiveDrag),
            Some(session) if session.pointer_id != pointer_id => {
                Err(DragSelectNoopReason::PointerMismatch)
            }
            Some(_) => Ok(()),
        }
    }

    fn noop(&mut self, from: DragSelectState, reason: DragSelectNoopReason) -> DragSelectTransition {
        trace!(?reason, "drag event ignored");
        self.transition(from, DragSelectEffect::Noop { reason })
    }

    fn transition(
        &mut self,
        from: DragSelectState,
        effect: DragSelectEffect,
    ) -> DragSelectTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragSelectTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state(),
            effect,
        }
    }
}

/// Set every cell's highlight from its overlap with `rect`. Returns the
/// number of highlighted cells.
fn highlight_pass(rect: Rect, grid: &mut SelectionGrid, surface: &impl GridSurface) -> usize {
    let span = trace_span!("highlight_pass", cells = grid.len());
    let _guard = span.enter();

    let space = surface.surface_space();
    let mut highlighted = 0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let index = CellIndex::new(row, col);
            let hit = surface
                .cell_bounds(index)
                .is_some_and(|bounds| space.viewport_to_surface(bounds).intersects(&rect));
            if grid.set_highlighted(index, hit).is_ok() && hit {
                highlighted += 1;
            }
        }
    }
    trace!(highlighted, "highlight pass complete");
    highlighted
}
