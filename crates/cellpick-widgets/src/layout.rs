#![forbid(unsafe_code)]

//! Rendering-side geometry for the selection grid.
//!
//! The drag controller never computes where cells are drawn. It asks a
//! [`GridSurface`], which the rendering layer implements, for each cell's
//! current bounds. [`UniformGridLayout`] is the stock implementation: equal
//! cells with a fixed gap, rows stacked from the top of the container and
//! each row centered horizontally.

use cellpick_core::geometry::{Point, Rect, SurfaceSpace};

use crate::drag_select::PointerCapture;
use crate::grid::CellIndex;
use crate::shape::GridShape;

/// The rendering collaborator as seen by the selection controllers.
pub trait GridSurface {
    /// Current bounds of a cell in viewport coordinates, or `None` when the
    /// cell is not laid out.
    fn cell_bounds(&self, index: CellIndex) -> Option<Rect>;

    /// Placement and scroll state of the drag surface.
    fn surface_space(&self) -> SurfaceSpace;

    /// Route subsequent move/up events for `pointer_id` to the drag surface.
    ///
    /// The returned guard releases the routing when dropped.
    fn capture_pointer(&self, _pointer_id: u32) -> PointerCapture {
        PointerCapture::detached()
    }
}

/// Default cell edge length.
pub const DEFAULT_CELL_SIZE: i32 = 24;

/// Default spacing between neighbouring cells.
pub const DEFAULT_GAP: i32 = 4;

/// Uniform cell layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformGridLayout {
    shape: GridShape,
    cell_width: i32,
    cell_height: i32,
    gap: i32,
    /// Width used to center rows; `0` left-aligns them.
    container_width: i32,
    space: SurfaceSpace,
}

impl UniformGridLayout {
    /// Create a layout for a shape with default cell metrics.
    #[must_use]
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            cell_width: DEFAULT_CELL_SIZE,
            cell_height: DEFAULT_CELL_SIZE,
            gap: DEFAULT_GAP,
            container_width: 0,
            space: SurfaceSpace::identity(),
        }
    }

    /// Set the cell size (builder).
    #[must_use]
    pub fn with_cell_size(mut self, width: i32, height: i32) -> Self {
        self.cell_width = width.max(0);
        self.cell_height = height.max(0);
        self
    }

    /// Set the gap between cells (builder).
    #[must_use]
    pub fn with_gap(mut self, gap: i32) -> Self {
        self.gap = gap.max(0);
        self
    }

    /// Center rows within this width (builder).
    #[must_use]
    pub fn with_container_width(mut self, width: i32) -> Self {
        self.container_width = width.max(0);
        self
    }

    /// Place the container in the viewport (builder).
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.space.origin = origin;
        self
    }

    /// Set the initial scroll offset (builder).
    #[must_use]
    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.space.scroll = scroll;
        self
    }

    /// Update the scroll offset.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.space.scroll = scroll;
    }

    /// Re-layout for a new shape.
    pub fn set_shape(&mut self, shape: GridShape) {
        self.shape = shape;
    }

    /// The laid-out shape.
    #[must_use]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    fn pitch_x(&self) -> i64 {
        i64::from(self.cell_width) + i64::from(self.gap)
    }

    fn pitch_y(&self) -> i64 {
        i64::from(self.cell_height) + i64::from(self.gap)
    }

    fn row_inset(&self) -> i64 {
        let cols = i64::try_from(self.shape.cols).unwrap_or(i64::MAX);
        if cols == 0 {
            return 0;
        }
        let row_width = cols
            .saturating_mul(self.pitch_x())
            .saturating_sub(i64::from(self.gap));
        ((i64::from(self.container_width) - row_width) / 2).max(0)
    }

    /// Bounds of a cell in surface coordinates.
    #[must_use]
    pub fn surface_bounds(&self, index: CellIndex) -> Option<Rect> {
        if index.row >= self.shape.rows || index.col >= self.shape.cols {
            return None;
        }
        let col = i64::try_from(index.col).ok()?;
        let row = i64::try_from(index.row).ok()?;
        let x = self.row_inset() + col * self.pitch_x();
        let y = row * self.pitch_y();
        Some(Rect::new(
            i32::try_from(x).ok()?,
            i32::try_from(y).ok()?,
            self.cell_width,
            self.cell_height,
        ))
    }

    /// The cell under a surface point, if any. Gaps belong to no cell.
    #[must_use]
    pub fn cell_at(&self, point: Point) -> Option<CellIndex> {
        let x = i64::from(point.x) - self.row_inset();
        let y = i64::from(point.y);
        if x < 0 || y < 0 || self.pitch_x() == 0 || self.pitch_y() == 0 {
            return None;
        }
        let index = CellIndex::new(
            usize::try_from(y / self.pitch_y()).ok()?,
            usize::try_from(x / self.pitch_x()).ok()?,
        );
        let bounds = self.surface_bounds(index)?;
        let inside = x % self.pitch_x() < i64::from(self.cell_width)
            && y % self.pitch_y() < i64::from(self.cell_height);
        (inside && bounds.contains(point)).then_some(index)
    }
}

impl GridSurface for UniformGridLayout {
    fn cell_bounds(&self, index: CellIndex) -> Option<Rect> {
        self.surface_bounds(index)
            .map(|rect| self.space.surface_to_viewport(rect))
    }

    fn surface_space(&self) -> SurfaceSpace {
        self.space
    }
}
