#![forbid(unsafe_code)]

//! Geometric primitives for pointer hit testing.
//!
//! Coordinates are signed so that viewport rectangles of cells scrolled out
//! above or left of the container stay representable. Two coordinate spaces
//! are in play and are never mixed implicitly:
//!
//! - **Viewport space**: where the rendering layer reports cell bounds.
//! - **Surface space**: relative to the scrollable container's content origin,
//!   where drag positions are reported.
//!
//! [`SurfaceSpace`] converts between the two.

/// A point in either viewport or surface space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Squared Euclidean distance, widened so it cannot overflow.
    #[inline]
    pub fn distance_squared(self, other: Point) -> u64 {
        let dx = i64::from(other.x).abs_diff(i64::from(self.x));
        let dy = i64::from(other.y).abs_diff(i64::from(self.y));
        (dx * dx).saturating_add(dy * dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned rectangle used for drag regions and cell bounds.
///
/// `width` and `height` are non-negative for every rectangle built through
/// [`Rect::new`] or [`Rect::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle. Negative extents are clamped to zero.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Zero-size rectangle at a point (the drag rectangle at press time).
    #[inline]
    pub const fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0, 0)
    }

    /// Normalized rectangle spanning two corners in any order.
    ///
    /// The origin is the component-wise minimum and the extents are the
    /// absolute deltas, so dragging up-left yields the same rectangle as
    /// dragging down-right over the same span.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        let width = i64::from(a.x).abs_diff(i64::from(b.x));
        let height = i64::from(a.y).abs_diff(i64::from(b.y));
        Self {
            x,
            y,
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Right edge, widened.
    #[inline]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Bottom edge, widened.
    #[inline]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        px >= i64::from(self.x)
            && px <= self.right()
            && py >= i64::from(self.y)
            && py <= self.bottom()
    }

    /// Separating-axis overlap test with closed-interval semantics.
    ///
    /// Rectangles that only share an edge or a corner intersect. A zero-size
    /// rectangle intersects anything touching its line or point.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < i64::from(other.x)
            || other.right() < i64::from(self.x)
            || self.bottom() < i64::from(other.y)
            || other.bottom() < i64::from(self.y))
    }

    /// Shift the rectangle by a delta.
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            width: self.width,
            height: self.height,
        }
    }
}

/// Placement of a scrollable drag surface inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSpace {
    /// Top-left corner of the container, in viewport coordinates.
    pub origin: Point,
    /// Current scroll offset of the container content.
    pub scroll: Point,
}

impl SurfaceSpace {
    /// Create a surface placement.
    #[inline]
    pub const fn new(origin: Point, scroll: Point) -> Self {
        Self { origin, scroll }
    }

    /// Surface that coincides with the viewport and is not scrolled.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(Point::new(0, 0), Point::new(0, 0))
    }

    /// Convert a viewport rectangle into surface coordinates.
    ///
    /// Adds the scroll offset and removes the container origin.
    #[inline]
    pub const fn viewport_to_surface(&self, rect: Rect) -> Rect {
        rect.translate(
            self.scroll.x.saturating_sub(self.origin.x),
            self.scroll.y.saturating_sub(self.origin.y),
        )
    }

    /// Convert a surface rectangle into viewport coordinates.
    #[inline]
    pub const fn surface_to_viewport(&self, rect: Rect) -> Rect {
        rect.translate(
            self.origin.x.saturating_sub(self.scroll.x),
            self.origin.y.saturating_sub(self.scroll.y),
        )
    }
}
