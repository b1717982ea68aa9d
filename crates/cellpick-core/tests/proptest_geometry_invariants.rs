//! Property-based invariant tests for geometry primitives (Point, Rect, SurfaceSpace).
//!
//! 1. Intersection is symmetric.
//! 2. Every rectangle intersects itself (including degenerate ones).
//! 3. Edge-sharing neighbours intersect; a one-unit gap separates them.
//! 4. `from_corners` is order-independent and yields non-negative extents.
//! 5. `from_corners` contains both corners.
//! 6. Surface conversion preserves extents and intersection results.
//! 7. No panics on extreme i32 values.

use cellpick_core::geometry::{Point, Rect, SurfaceSpace};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn small_point_strategy() -> impl Strategy<Value = Point> {
    (-2_000i32..=2_000, -2_000i32..=2_000).prop_map(|(x, y)| Point::new(x, y))
}

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (-1_000i32..=1_000, -1_000i32..=1_000, 0i32..=500, 0i32..=500)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn any_rect_strategy() -> impl Strategy<Value = Rect> {
    (any::<i32>(), any::<i32>(), any::<i32>(), any::<i32>())
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Intersection is symmetric
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersects_symmetric(a in small_rect_strategy(), b in small_rect_strategy()) {
        prop_assert_eq!(
            a.intersects(&b),
            b.intersects(&a),
            "intersects is not symmetric: a={:?}, b={:?}",
            a, b
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Reflexive
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersects_reflexive(a in small_rect_strategy()) {
        prop_assert!(a.intersects(&a), "{:?} should intersect itself", a);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Closed boundaries
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edge_neighbours_touch_and_gap_separates(a in small_rect_strategy()) {
        let right_neighbour = Rect::new(a.x + a.width, a.y, 5, a.height);
        prop_assert!(a.intersects(&right_neighbour));

        let gapped = Rect::new(a.x + a.width + 1, a.y, 5, a.height);
        prop_assert!(!a.intersects(&gapped));

        let below = Rect::new(a.x, a.y + a.height, a.width, 5);
        prop_assert!(a.intersects(&below));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. from_corners normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn from_corners_order_independent(a in small_point_strategy(), b in small_point_strategy()) {
        let r = Rect::from_corners(a, b);
        prop_assert_eq!(r, Rect::from_corners(b, a));
        prop_assert!(r.width >= 0 && r.height >= 0);
        prop_assert_eq!(r.width, (a.x - b.x).abs());
        prop_assert_eq!(r.height, (a.y - b.y).abs());
    }

    #[test]
    fn from_corners_contains_both_corners(a in small_point_strategy(), b in small_point_strategy()) {
        let r = Rect::from_corners(a, b);
        prop_assert!(r.contains(a), "{:?} should contain {:?}", r, a);
        prop_assert!(r.contains(b), "{:?} should contain {:?}", r, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Surface conversion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn surface_conversion_preserves_intersection(
        a in small_rect_strategy(),
        b in small_rect_strategy(),
        origin in small_point_strategy(),
        scroll in small_point_strategy(),
    ) {
        let space = SurfaceSpace::new(origin, scroll);
        let sa = space.viewport_to_surface(a);
        let sb = space.viewport_to_surface(b);
        prop_assert_eq!((sa.width, sa.height), (a.width, a.height));
        prop_assert_eq!(sa.intersects(&sb), a.intersects(&b));
        prop_assert_eq!(space.surface_to_viewport(sa), a);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Extreme values
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_panic_on_extreme_values(a in any_rect_strategy(), b in any_rect_strategy()) {
        let _ = a.intersects(&b);
        let _ = a.right();
        let _ = a.bottom();
        let _ = Rect::from_corners(a.origin(), b.origin());
        let _ = a.origin().distance_squared(b.origin());
    }
}
