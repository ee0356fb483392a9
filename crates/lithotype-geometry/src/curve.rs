//! Bezier curve primitives.
//!
//! Provides quadratic and cubic Bezier curves for glyph outline flattening.

use crate::Point2D;

/// A quadratic Bezier curve (one control point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    /// Start point
    pub from: Point2D,
    /// Control point
    pub control: Point2D,
    /// End point
    pub to: Point2D,
}

impl QuadraticBezier {
    /// Create a new quadratic Bezier curve.
    pub fn new(from: Point2D, control: Point2D, to: Point2D) -> Self {
        Self { from, control, to }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f64) -> Point2D {
        let mt = 1.0 - t;
        self.from * (mt * mt) + self.control * (2.0 * mt * t) + self.to * (t * t)
    }

    /// Split the curve at parameter t, returning two curves.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let p01 = self.from.lerp(self.control, t);
        let p12 = self.control.lerp(self.to, t);
        let p012 = p01.lerp(p12, t);

        (
            Self::new(self.from, p01, p012),
            Self::new(p012, p12, self.to),
        )
    }

    /// `samples` evenly spaced points for t in (0, 1]. The last point is
    /// exactly `to`, the start point is not included.
    pub fn sample_points(&self, samples: usize) -> Vec<Point2D> {
        sample(samples, self.to, |t| self.eval(t))
    }
}

/// A cubic Bezier curve (two control points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point
    pub from: Point2D,
    /// First control point
    pub control1: Point2D,
    /// Second control point
    pub control2: Point2D,
    /// End point
    pub to: Point2D,
}

impl CubicBezier {
    /// Create a new cubic Bezier curve.
    pub fn new(from: Point2D, control1: Point2D, control2: Point2D, to: Point2D) -> Self {
        Self {
            from,
            control1,
            control2,
            to,
        }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f64) -> Point2D {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        self.from * (mt2 * mt)
            + self.control1 * (3.0 * mt2 * t)
            + self.control2 * (3.0 * mt * t2)
            + self.to * (t2 * t)
    }

    /// Split the curve at parameter t, returning two curves.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let p01 = self.from.lerp(self.control1, t);
        let p12 = self.control1.lerp(self.control2, t);
        let p23 = self.control2.lerp(self.to, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let p0123 = p012.lerp(p123, t);

        (
            Self::new(self.from, p01, p012, p0123),
            Self::new(p0123, p123, p23, self.to),
        )
    }

    /// Same sampling as [`QuadraticBezier::sample_points`].
    pub fn sample_points(&self, samples: usize) -> Vec<Point2D> {
        sample(samples, self.to, |t| self.eval(t))
    }
}

fn sample(samples: usize, to: Point2D, eval: impl Fn(f64) -> Point2D) -> Vec<Point2D> {
    let samples = samples.max(1);
    (1..=samples)
        .map(|i| if i == samples { to } else { eval(i as f64 / samples as f64) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_endpoints() {
        let curve = QuadraticBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(50.0, 100.0),
            Point2D::new(100.0, 0.0),
        );

        assert_eq!(curve.eval(0.0), curve.from);
        assert_eq!(curve.eval(1.0), curve.to);
        assert_eq!(curve.eval(0.5), Point2D::new(50.0, 50.0));
    }

    #[test]
    fn test_cubic_endpoints() {
        let curve = CubicBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(25.0, 100.0),
            Point2D::new(75.0, 100.0),
            Point2D::new(100.0, 0.0),
        );

        assert_eq!(curve.eval(0.0), curve.from);
        assert_eq!(curve.eval(1.0), curve.to);
    }

    #[test]
    fn test_quadratic_split() {
        let curve = QuadraticBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(50.0, 100.0),
            Point2D::new(100.0, 0.0),
        );

        let (left, right) = curve.split(0.5);
        let midpoint = curve.eval(0.5);

        assert!((left.to - midpoint).length() < 1e-9);
        assert!((right.from - midpoint).length() < 1e-9);
    }

    #[test]
    fn test_sample_points() {
        let curve = CubicBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(1.0, 0.0),
        );
        let points = curve.sample_points(10);
        assert_eq!(points.len(), 10);
        assert_eq!(points[9], curve.to);
        assert!((points[4] - curve.eval(0.5)).length() < 1e-12);

        // Zero samples still reaches the end point
        assert_eq!(curve.sample_points(0), vec![curve.to]);
    }
}
