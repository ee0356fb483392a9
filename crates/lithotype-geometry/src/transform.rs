//! Translation plus uniform scale, the only placement glyph shapes need.

use glam::DVec3;

/// An affine map made of a 3D translation and a uniform scale.
///
/// Applying a transform to `p` yields `p * scale + (tx, ty, tz)`. There is no
/// rotation; animating the rendered instances owns that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        tz: 0.0,
        scale: 1.0,
    };

    pub const fn new(tx: f64, ty: f64, tz: f64, scale: f64) -> Self {
        Self { tx, ty, tz, scale }
    }

    /// Create a translation transform.
    pub const fn translate(tx: f64, ty: f64, tz: f64) -> Self {
        Self::new(tx, ty, tz, 1.0)
    }

    /// Create a uniform scale transform.
    pub const fn scale(factor: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, factor)
    }

    /// Compose with a child transform: the result applies `child` first, then `self`.
    pub fn concat(&self, child: &Transform) -> Self {
        Self {
            tx: child.tx * self.scale + self.tx,
            ty: child.ty * self.scale + self.ty,
            tz: child.tz * self.scale + self.tz,
            scale: child.scale * self.scale,
        }
    }

    /// Transform a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64, z: f64) -> DVec3 {
        DVec3::new(
            x * self.scale + self.tx,
            y * self.scale + self.ty,
            z * self.scale + self.tz,
        )
    }

    /// Get the translation component.
    pub fn translation(&self) -> DVec3 {
        DVec3::new(self.tx, self.ty, self.tz)
    }

    /// The same placement expressed in a frame whose x and y axes are negated.
    pub fn mirror_xy(&self) -> Self {
        Self {
            tx: -self.tx,
            ty: -self.ty,
            ..*self
        }
    }
}

impl std::ops::Mul<Transform> for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.concat(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let t = Transform::IDENTITY;
        assert_eq!(t.apply(10.0, 20.0, 3.0), DVec3::new(10.0, 20.0, 3.0));
        assert_eq!(Transform::default(), t);
    }

    #[test]
    fn test_concat_applies_child_first() {
        let parent = Transform::new(5.0, 10.0, 0.0, 2.0);
        let child = Transform::new(1.0, 1.0, 1.0, 3.0);
        let combined = parent.concat(&child);

        let p = child.apply(1.0, 2.0, 0.0);
        let expected = parent.apply(p.x, p.y, p.z);
        assert_eq!(combined.apply(1.0, 2.0, 0.0), expected);
        assert_eq!(combined, Transform::new(7.0, 12.0, 2.0, 6.0));
    }

    #[test]
    fn test_concat_is_not_commutative() {
        let a = Transform::new(1.0, 0.0, 0.0, 2.0);
        let b = Transform::new(3.0, 0.0, 0.0, 1.0);
        assert_ne!(a.concat(&b), b.concat(&a));
        assert_eq!(a * b, a.concat(&b));
    }

    #[test]
    fn test_mirror_xy_keeps_depth_and_scale() {
        let t = Transform::new(1.0, -2.0, 3.0, 4.0).mirror_xy();
        assert_eq!(t, Transform::new(-1.0, 2.0, 3.0, 4.0));
    }
}
