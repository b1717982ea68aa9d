#![forbid(unsafe_code)]

//! End-to-end selection scenarios driven through `SelectionWidget`.
//!
//! Run with: cargo test -p cellpick-widgets --test selection_scenarios

use std::cell::Cell as Counter;
use std::rc::Rc;

use cellpick_core::event::PointerEvent;
use cellpick_core::geometry::{Point, Rect, SurfaceSpace};
use cellpick_widgets::drag_select::{DragCancelReason, DragSelectEffect, PointerCapture};
use cellpick_widgets::grid::CellIndex;
use cellpick_widgets::layout::{GridSurface, UniformGridLayout};
use cellpick_widgets::selection_widget::{
    EventOutcome, GridEvent, GridTarget, SelectionConfig, SelectionWidget,
};
use cellpick_widgets::shape::GridShape;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A layout that counts pointer captures taken and released.
struct CountingSurface {
    layout: UniformGridLayout,
    acquired: Rc<Counter<u32>>,
    released: Rc<Counter<u32>>,
}

impl CountingSurface {
    fn new(layout: UniformGridLayout) -> Self {
        Self {
            layout,
            acquired: Rc::new(Counter::new(0)),
            released: Rc::new(Counter::new(0)),
        }
    }

    fn outstanding(&self) -> u32 {
        self.acquired.get() - self.released.get()
    }
}

impl GridSurface for CountingSurface {
    fn cell_bounds(&self, index: CellIndex) -> Option<Rect> {
        self.layout.cell_bounds(index)
    }

    fn surface_space(&self) -> SurfaceSpace {
        self.layout.surface_space()
    }

    fn capture_pointer(&self, _pointer_id: u32) -> PointerCapture {
        self.acquired.set(self.acquired.get() + 1);
        let released = Rc::clone(&self.released);
        PointerCapture::new(move || released.set(released.get() + 1))
    }
}

/// 10x10 cells with a 10-unit gap: column `c` spans `x in [20c, 20c + 10]`.
fn layout(shape: GridShape) -> UniformGridLayout {
    UniformGridLayout::new(shape)
        .with_cell_size(10, 10)
        .with_gap(10)
}

fn widget(descriptor: &str) -> SelectionWidget {
    SelectionWidget::new(SelectionConfig::default().with_initial_shape(descriptor))
}

fn on_backdrop(event: PointerEvent) -> GridEvent {
    GridEvent::pointer(event, GridTarget::Backdrop)
}

fn selected(widget: &SelectionWidget, row: usize, col: usize) -> bool {
    widget
        .grid()
        .is_selected(CellIndex::new(row, col))
        .expect("index in range")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn drag_over_top_row_selects_exactly_those_cells() {
    let mut w = widget("(2,2)");
    let surface = layout(w.shape());
    assert_eq!(w.grid().len(), 4);

    w.handle_event(&on_backdrop(PointerEvent::down(2, 2)), &surface);
    w.handle_event(&on_backdrop(PointerEvent::moved(28, 6)), &surface);
    assert_eq!(w.view().to_string(), "++\n..");
    w.handle_event(&on_backdrop(PointerEvent::up(28, 6)), &surface);

    assert!(selected(&w, 0, 0));
    assert!(selected(&w, 0, 1));
    assert!(!selected(&w, 1, 0));
    assert!(!selected(&w, 1, 1));
    assert_eq!(w.grid().highlighted_count(), 0);
    assert_eq!(w.view().to_string(), "##\n..");
}

#[test]
fn clicking_a_cell_twice_restores_it() {
    let mut w = widget("(2,2)");
    let surface = layout(w.shape());
    let target = CellIndex::new(1, 1);

    w.handle_event(&GridEvent::Click(target), &surface);
    assert!(selected(&w, 1, 1));
    assert_eq!(w.grid().selected_count(), 1);

    w.handle_event(&GridEvent::Click(target), &surface);
    assert!(!selected(&w, 1, 1));
    assert_eq!(w.grid().selected_count(), 0);
}

#[test]
fn press_and_release_on_a_cell_is_a_click() {
    let mut w = widget("(2,2)");
    let surface = layout(w.shape());
    let cell = GridTarget::Cell(CellIndex::new(1, 1));

    for expected in [true, false] {
        w.handle_event(&GridEvent::pointer(PointerEvent::down(25, 25), cell), &surface);
        w.handle_event(&GridEvent::pointer(PointerEvent::up(26, 25), cell), &surface);
        assert_eq!(selected(&w, 1, 1), expected);
        assert_eq!(w.grid().selected_count(), usize::from(expected));
    }
}

#[test]
fn lost_capture_mid_drag_changes_no_selection() {
    let mut w = widget("(2,2)");
    let surface = layout(w.shape());
    w.handle_event(&GridEvent::Click(CellIndex::new(1, 0)), &surface);
    let before: Vec<_> = w.grid().selected_indices();

    w.handle_event(&on_backdrop(PointerEvent::down(0, 0)), &surface);
    w.handle_event(&on_backdrop(PointerEvent::moved(30, 30)), &surface);
    assert!(w.grid().highlighted_count() > 0);

    let outcome = w.handle_event(&on_backdrop(PointerEvent::cancel()), &surface);
    assert!(matches!(
        outcome,
        EventOutcome::Drag(t) if matches!(
            t.effect,
            DragSelectEffect::Canceled { reason: DragCancelReason::CaptureLost, .. }
        )
    ));
    assert_eq!(w.grid().highlighted_count(), 0);
    assert_eq!(w.grid().selected_indices(), before);

    // A late release after the cancel does nothing.
    w.handle_event(&on_backdrop(PointerEvent::up(30, 30)), &surface);
    assert_eq!(w.grid().selected_indices(), before);
}

#[test]
fn shape_change_discards_previous_selection() {
    let mut w = widget("(2,2)");
    let surface = layout(w.shape());
    w.handle_event(&GridEvent::Click(CellIndex::new(0, 0)), &surface);
    assert!(selected(&w, 0, 0));

    let outcome = w.handle_event(&GridEvent::ShapeChanged("(3,3)".into()), &surface);
    assert_eq!(
        outcome,
        EventOutcome::ShapeApplied {
            shape: GridShape::new(3, 3),
            reset: true
        }
    );
    assert_eq!(w.grid().len(), 9);
    assert_eq!(w.grid().selected_count(), 0);
    assert_eq!(w.grid().highlighted_count(), 0);
}

// ============================================================================
// Coordinate spaces
// ============================================================================

#[test]
fn scrolled_container_hits_cells_in_surface_space() {
    let mut w = widget("(3,2)");
    // Container placed at (100, 50) and scrolled down by 40: row 1 sits at
    // surface y in [20, 30] but viewport y in [30, 40].
    let surface = layout(w.shape())
        .with_origin(Point::new(100, 50))
        .with_scroll(Point::new(0, 40));
    assert_eq!(
        surface.cell_bounds(CellIndex::new(1, 0)),
        Some(Rect::new(100, 30, 10, 10))
    );

    w.handle_event(&on_backdrop(PointerEvent::down(2, 22)), &surface);
    w.handle_event(&on_backdrop(PointerEvent::moved(5, 25)), &surface);
    w.handle_event(&on_backdrop(PointerEvent::up(5, 25)), &surface);

    assert_eq!(w.grid().selected_indices(), vec![CellIndex::new(1, 0)]);
}

#[test]
fn centered_rows_offset_hit_testing() {
    let mut w = widget("(1,2)");
    // Row width 30 centered in 100 puts the cells at x = 35 and x = 55.
    let surface = layout(w.shape()).with_container_width(100);

    w.handle_event(&on_backdrop(PointerEvent::down(0, 0)), &surface);
    w.handle_event(&on_backdrop(PointerEvent::moved(40, 5)), &surface);
    w.handle_event(&on_backdrop(PointerEvent::up(40, 5)), &surface);

    assert_eq!(w.grid().selected_indices(), vec![CellIndex::new(0, 0)]);
}

// ============================================================================
// Pointer capture lifecycle
// ============================================================================

#[test]
fn capture_released_after_commit() {
    let mut w = widget("(2,2)");
    let surface = CountingSurface::new(layout(w.shape()));
    w.handle_event(&on_backdrop(PointerEvent::down(0, 0)), &surface);
    assert_eq!(surface.outstanding(), 1);
    w.handle_event(&on_backdrop(PointerEvent::up(0, 0)), &surface);
    assert_eq!(surface.acquired.get(), 1);
    assert_eq!(surface.outstanding(), 0);
}

#[test]
fn refused_concurrent_capture_released_immediately() {
    let mut w = widget("(2,2)");
    let surface = CountingSurface::new(layout(w.shape()));
    w.handle_event(&on_backdrop(PointerEvent::down(0, 0)), &surface);
    let outcome = w.handle_event(
        &on_backdrop(PointerEvent::down(5, 5).with_pointer_id(2)),
        &surface,
    );
    assert!(matches!(outcome, EventOutcome::DragRefused(_)));
    assert_eq!(surface.acquired.get(), 2);
    assert_eq!(surface.outstanding(), 1);

    w.handle_event(&on_backdrop(PointerEvent::cancel()), &surface);
    assert_eq!(surface.outstanding(), 0);
}

#[test]
fn shape_change_and_drop_release_capture() {
    let mut w = widget("(2,2)");
    let surface = CountingSurface::new(layout(w.shape()));
    w.handle_event(&on_backdrop(PointerEvent::down(0, 0)), &surface);
    w.handle_event(&GridEvent::ShapeChanged("(4,4)".into()), &surface);
    assert_eq!(surface.outstanding(), 0);

    w.handle_event(&on_backdrop(PointerEvent::down(0, 0)), &surface);
    assert_eq!(surface.outstanding(), 1);
    drop(w);
    assert_eq!(surface.outstanding(), 0);
    assert_eq!(surface.released.get(), 2);
}

#[test]
fn input_targets_never_take_capture() {
    let mut w = widget("(2,2)");
    let surface = CountingSurface::new(layout(w.shape()));
    for target in [GridTarget::ShapeInput, GridTarget::CommandInput] {
        let outcome = w.handle_event(&GridEvent::pointer(PointerEvent::down(0, 0), target), &surface);
        assert_eq!(outcome, EventOutcome::Ignored);
    }
    assert_eq!(surface.acquired.get(), 0);
}
