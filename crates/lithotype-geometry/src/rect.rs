//! Axis-aligned rectangles used as bounding boxes.

use crate::Point2D;

/// Axis-aligned rectangle spanning `(x1, y1)` to `(x2, y2)` with `x1 <= x2`, `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2D {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect2D {
    /// Create a rectangle from two corners in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Smallest rectangle containing every point; `None` for an empty iterator.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut rect = Self {
            x1: first.x,
            y1: first.y,
            x2: first.x,
            y2: first.y,
        };
        for p in iter {
            rect.x1 = rect.x1.min(p.x);
            rect.y1 = rect.y1.min(p.y);
            rect.x2 = rect.x2.max(p.x);
            rect.y2 = rect.y2.max(p.y);
        }
        Some(rect)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Edges count as inside.
    pub fn contains_point(&self, p: Point2D) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// True if the rectangles overlap or touch.
    pub fn intersects(&self, other: &Rect2D) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    /// True if `other` lies entirely within `self` (shared edges allowed).
    pub fn contains(&self, other: &Rect2D) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let pts = [
            Point2D::new(3.0, -1.0),
            Point2D::new(-2.0, 4.0),
            Point2D::new(0.0, 0.0),
        ];
        let r = Rect2D::from_points(&pts).unwrap();
        assert_eq!(r, Rect2D::new(-2.0, -1.0, 3.0, 4.0));
        assert_eq!(r.width(), 5.0);
        assert_eq!(r.height(), 5.0);
        assert!(Rect2D::from_points(&Vec::<Point2D>::new()).is_none());
    }

    #[test]
    fn test_intersects_and_contains() {
        let outer = Rect2D::new(0.0, 0.0, 10.0, 10.0);
        let inner = Rect2D::new(2.0, 2.0, 4.0, 4.0);
        let touching = Rect2D::new(10.0, 0.0, 12.0, 2.0);
        let apart = Rect2D::new(11.0, 11.0, 12.0, 12.0);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.intersects(&inner));
        assert!(outer.intersects(&touching));
        assert!(!outer.intersects(&apart));
        assert!(outer.contains_point(Point2D::new(10.0, 5.0)));
    }
}
