//! Collision predicates for axis-aligned boxes
//!
//! Everything in the world is a screen-space box except projectiles, which are
//! circles tested against boxes using their bounding square. All predicates are
//! pure and total: NaN or degenerate inputs simply report no contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(self, other)
    }
}

/// Strict AABB overlap test
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.bottom() > b.y && a.y < b.bottom()
}

/// Circle vs box, approximating the circle by its bounding square
#[inline]
pub fn circle_box_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    rect.x < center.x + radius
        && rect.right() > center.x - radius
        && rect.y < center.y + radius
        && rect.bottom() > center.y - radius
}

/// Side contact: `body` overlaps `wall` vertically and straddles its left or
/// right edge.
pub fn straddles_side(body: &Rect, wall: &Rect) -> bool {
    let vertical = body.y < wall.bottom() && body.bottom() > wall.y;
    let left_edge = body.right() > wall.x && body.x < wall.x;
    let right_edge = body.x < wall.right() && body.right() > wall.right();
    vertical && (left_edge || right_edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        assert!(aabb_overlap(&a, &Rect::new(20.0, 20.0, 30.0, 30.0)));
        assert!(!aabb_overlap(&a, &Rect::new(40.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let below = Rect::new(0.0, 30.0, 30.0, 10.0);
        assert!(!a.overlaps(&below));
        let right = Rect::new(30.0, 0.0, 10.0, 30.0);
        assert!(!a.overlaps(&right));
    }

    #[test]
    fn test_circle_box_uses_bounding_square() {
        let player = Rect::new(100.0, 100.0, 30.0, 30.0);
        // Diagonal corner: outside the true circle, inside its square
        assert!(circle_box_overlap(Vec2::new(96.0, 96.0), 5.0, &player));
        assert!(!circle_box_overlap(Vec2::new(94.0, 115.0), 5.0, &player));
    }

    #[test]
    fn test_straddles_side() {
        let wall = Rect::new(100.0, 100.0, 150.0, 30.0);
        // Across the left edge
        assert!(straddles_side(&Rect::new(80.0, 105.0, 30.0, 30.0), &wall));
        // Across the right edge
        assert!(straddles_side(&Rect::new(240.0, 105.0, 30.0, 30.0), &wall));
        // Fully inside the span: not a side contact
        assert!(!straddles_side(&Rect::new(150.0, 105.0, 30.0, 30.0), &wall));
        // Vertically clear
        assert!(!straddles_side(&Rect::new(80.0, 200.0, 30.0, 30.0), &wall));
    }

    #[test]
    fn test_nan_never_overlaps() {
        let a = Rect::new(f32::NAN, 0.0, 30.0, 30.0);
        assert!(!aabb_overlap(&a, &Rect::new(0.0, 0.0, 30.0, 30.0)));
        assert!(!circle_box_overlap(Vec2::new(f32::NAN, 0.0), 5.0, &a));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, 0.0f32..300.0, 0.0f32..300.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(aabb_overlap(&a, &b), aabb_overlap(&b, &a));
        }

        #[test]
        fn zero_width_box_never_overlaps(
            a in arb_rect(),
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            h in 0.0f32..300.0,
        ) {
            let flat = Rect::new(x, y, 0.0, h);
            // A zero-width box can only overlap something strictly containing its x
            if aabb_overlap(&flat, &a) {
                prop_assert!(a.x < x && x < a.right());
            }
        }

        #[test]
        fn side_contact_implies_overlap(a in arb_rect(), b in arb_rect()) {
            if straddles_side(&a, &b) {
                prop_assert!(aabb_overlap(&a, &b));
            }
        }
    }
}
