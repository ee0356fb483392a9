//! 2D points and direction vectors.
//!
//! Both are plain `glam::DVec2` values. Geometry runs in `f64` so that repeated
//! intersection and splitting keeps exact coordinate equality where the algorithms
//! rely on it (loop detection in `Polygon2D::deintersect`).

use glam::DVec2;

/// A position in the plane.
pub type Point2D = DVec2;

/// A direction or displacement in the plane.
pub type Vec2D = DVec2;

/// Operations on [`Vec2D`] that `glam` does not name the way the geometry code needs.
pub trait Vec2DExt {
    /// Rotate 90 degrees clockwise (for a y-up frame): `(x, y) -> (y, -x)`.
    fn right90(self) -> Self;

    /// Unit vector in the same direction; the zero vector maps to itself.
    fn unit(self) -> Self;

    /// Vector from `self` to `other`.
    fn vector_to(self, other: Self) -> Self;
}

impl Vec2DExt for DVec2 {
    #[inline]
    fn right90(self) -> Self {
        DVec2::new(self.y, -self.x)
    }

    #[inline]
    fn unit(self) -> Self {
        self.normalize_or_zero()
    }

    #[inline]
    fn vector_to(self, other: Self) -> Self {
        other - self
    }
}

/// Bit-exact key for a point, for hashing coordinates that must match exactly.
#[inline]
pub(crate) fn point_key(p: Point2D) -> (u64, u64) {
    // Fold -0.0 into 0.0 so both hash alike; they compare equal as floats.
    let x = if p.x == 0.0 { 0.0 } else { p.x };
    let y = if p.y == 0.0 { 0.0 } else { p.y };
    (x.to_bits(), y.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right90() {
        let v = Vec2D::new(1.0, 0.0);
        assert_eq!(v.right90(), Vec2D::new(0.0, -1.0));
        assert_eq!(v.right90().right90().right90().right90(), v);
    }

    #[test]
    fn test_unit_of_zero_is_zero() {
        assert_eq!(Vec2D::ZERO.unit(), Vec2D::ZERO);
        let u = Vec2D::new(3.0, 4.0).unit();
        assert!((u.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_key_signed_zero() {
        assert_eq!(point_key(Point2D::new(0.0, -0.0)), point_key(Point2D::ZERO));
    }
}
