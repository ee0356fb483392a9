//! Infinite lines and bounded segments.

use crate::{GeometryError, GeometryResult, Point2D, Vec2D};

/// An infinite line through `point` along `direction`, parameterized as
/// `point + t * direction` for every real `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    pub point: Point2D,
    pub direction: Vec2D,
}

impl Line2D {
    pub fn new(point: Point2D, direction: Vec2D) -> Self {
        Self { point, direction }
    }

    /// Line through two points, parameterized so that `t = 0` is `from` and `t = 1` is `to`.
    pub fn through(from: Point2D, to: Point2D) -> Self {
        Self::new(from, to - from)
    }

    /// Parameters `(t, s)` at which `self` and `other` meet, `t` along `self`
    /// and `s` along `other`.
    ///
    /// Returns `None` when the lines are parallel (or either direction is zero).
    pub fn intersection_ts(&self, other: &Line2D) -> Option<(f64, f64)> {
        let denom = self.direction.perp_dot(other.direction);
        if denom == 0.0 || !denom.is_finite() {
            return None;
        }

        let delta = other.point - self.point;
        let t = delta.perp_dot(other.direction) / denom;
        let s = delta.perp_dot(self.direction) / denom;
        Some((t, s))
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point2D {
        self.point + self.direction * t
    }

    /// Intersection point of the two lines, or `None` if they are parallel.
    pub fn intersection(&self, other: &Line2D) -> Option<Point2D> {
        self.intersection_ts(other).map(|(t, _)| self.point_at(t))
    }
}

/// A bounded segment from `p1` to `p2`, never zero length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2D {
    p1: Point2D,
    p2: Point2D,
    line: Line2D,
}

impl Segment2D {
    /// Create a segment; fails with `InvalidGeometry` when both endpoints coincide.
    pub fn new(p1: Point2D, p2: Point2D) -> GeometryResult<Self> {
        if p1 == p2 {
            return Err(GeometryError::zero_length_segment());
        }
        Ok(Self {
            p1,
            p2,
            line: Line2D::through(p1, p2),
        })
    }

    /// Segments joining each point to its successor, closing back to the first.
    pub fn closed_loop(points: &[Point2D]) -> GeometryResult<Vec<Self>> {
        let n = points.len();
        (0..n)
            .map(|i| Segment2D::new(points[i], points[(i + 1) % n]))
            .collect()
    }

    pub fn start(&self) -> Point2D {
        self.p1
    }

    pub fn end(&self) -> Point2D {
        self.p2
    }

    pub fn line(&self) -> &Line2D {
        &self.line
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Point2D {
        self.line.point_at(t)
    }

    /// Parameters of the crossing with `other` when it lies within both segments
    /// (endpoints included).
    pub fn intersection_ts(&self, other: &Segment2D) -> Option<(f64, f64)> {
        let (t, s) = self.line.intersection_ts(&other.line)?;
        let within = |v: f64| (0.0..=1.0).contains(&v);
        (within(t) && within(s)).then_some((t, s))
    }

    /// Crossing point with `other`, if the segments meet.
    pub fn intersection(&self, other: &Segment2D) -> Option<Point2D> {
        self.intersection_ts(other).map(|(t, _)| self.point_at(t))
    }

    /// The part of this segment between parameters `t0` and `t1`.
    pub fn subsegment(&self, t0: f64, t1: f64) -> GeometryResult<Self> {
        Segment2D::new(self.point_at(t0), self.point_at(t1))
    }

    /// Split at an interior point; `None` if `point` is one of the endpoints.
    pub fn split_at_point(&self, point: Point2D) -> Option<(Self, Self)> {
        let first = Segment2D::new(self.p1, point).ok()?;
        let second = Segment2D::new(point, self.p2).ok()?;
        Some((first, second))
    }

    /// Split at parameter `t`. Splitting at (or numerically onto) an endpoint
    /// returns the segment unchanged.
    pub fn split(&self, t: f64) -> Vec<Self> {
        if t <= 0.0 || t >= 1.0 {
            return vec![*self];
        }
        match self.split_at_point(self.point_at(t)) {
            Some((a, b)) => vec![a, b],
            None => vec![*self],
        }
    }
}
