//! Property-based invariant tests for [`Bounds`].
//!
//! 1. Width/height are the edge differences.
//! 2. Every non-degenerate rectangle contains its own local extent.
//! 3. Containment is transitive.
//! 4. Contained rectangles agree with intersection in the local frame.
//! 5. Translation preserves size, and containment depends only on size.

use proptest::prelude::*;
use tessera_core::geometry::Bounds;

fn bounds_strategy() -> impl Strategy<Value = Bounds> {
    (-500i32..=500, -500i32..=500, 1i32..=300, 1i32..=300)
        .prop_map(|(x, y, w, h)| Bounds::new(x, y, x + w, y + h))
}

fn any_bounds_strategy() -> impl Strategy<Value = Bounds> {
    (-500i32..=500, -500i32..=500, -500i32..=500, -500i32..=500)
        .prop_map(|(x1, y1, x2, y2)| Bounds::new(x1, y1, x2, y2))
}

proptest! {
    #[test]
    fn size_is_edge_difference(b in any_bounds_strategy()) {
        prop_assert_eq!(b.width(), b.x2 - b.x1);
        prop_assert_eq!(b.height(), b.y2 - b.y1);
    }

    #[test]
    fn contains_own_extent(b in bounds_strategy()) {
        let extent = Bounds::new(0, 0, b.width(), b.height());
        prop_assert!(b.contains(&extent), "{:?} should contain {:?}", b, extent);
    }

    #[test]
    fn degenerate_never_contained(outer in bounds_strategy(), b in any_bounds_strategy()) {
        if b.is_degenerate() {
            prop_assert!(!outer.contains(&b));
        }
    }

    #[test]
    fn containment_is_transitive(
        a in bounds_strategy(),
        b in bounds_strategy(),
        c in bounds_strategy(),
    ) {
        if a.contains(&b) && b.contains(&c) {
            prop_assert!(a.contains(&c));
        }
    }

    #[test]
    fn contained_equals_intersection(a in bounds_strategy(), b in bounds_strategy()) {
        let extent = Bounds::new(0, 0, a.width(), a.height());
        prop_assert_eq!(a.contains(&b), extent.intersection(&b) == Some(b));
    }

    #[test]
    fn translate_preserves_size_and_containment(
        a in bounds_strategy(),
        b in bounds_strategy(),
        dx in -100i32..=100,
        dy in -100i32..=100,
    ) {
        let ta = a.translate(dx, dy);
        let tb = b.translate(dx, dy);
        prop_assert_eq!(ta.width(), a.width());
        prop_assert_eq!(ta.height(), a.height());
        prop_assert_eq!(ta.contains(&b), a.contains(&b));
        prop_assert_eq!(tb.contains(&a), b.contains(&a));
    }
}
