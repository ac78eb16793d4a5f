//! Axis-aligned rectangles for drop-target hit testing.
//!
//! Drag-and-drop games decide where a release landed with two tests:
//! rect-overlap for dragged pieces against shadows, and point-in-rect for
//! a pointer release against a bin. Overlap counts touching edges as a
//! hit; point containment is strict, so a release exactly on a bin border
//! misses.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// True if the rectangles overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    /// True if the point lies strictly inside the rectangle.
    #[must_use]
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px > self.x && px < self.right() && py > self.y && py < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_disjoint_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(5.0, 5.0));
        assert!(!r.contains_point(0.0, 5.0));
        assert!(!r.contains_point(10.0, 5.0));
        assert!(!r.contains_point(15.0, 5.0));
    }
}
