//! Safe scalar and vector math.
//!
//! Every helper here returns a defined fallback (usually zero) where the
//! naive operation would divide by (near-)zero or leave the domain of
//! `sqrt`/`acos`. The numerical core relies on these never producing
//! NaN or Infinity. Structural errors are reported elsewhere.

use elasto_types::constants::EPSILON;
use glam::{Mat2, Vec2};

/// Square root, zero for non-positive input.
#[inline]
pub fn safe_sqrt(v: f32) -> f32 {
    if v <= 0.0 {
        return 0.0;
    }
    v.sqrt()
}

/// `n / sqrt(d)`, zero when `d` is non-positive or its root is tiny.
#[inline]
pub fn safe_inv_sqrt(n: f32, d: f32) -> f32 {
    if d <= 0.0 {
        return 0.0;
    }
    let d = d.sqrt();
    if d < EPSILON {
        return 0.0;
    }
    n / d
}

/// Reciprocal, zero when `|v| < EPSILON`.
#[inline]
pub fn safe_inv(v: f32) -> f32 {
    if v.abs() < EPSILON {
        return 0.0;
    }
    1.0 / v
}

/// Division, zero when `|d| < EPSILON`.
#[inline]
pub fn safe_div(n: f32, d: f32) -> f32 {
    if d.abs() < EPSILON {
        return 0.0;
    }
    n / d
}

/// Arccosine with the argument clamped to [-1, 1].
#[inline]
pub fn safe_acos(r: f32) -> f32 {
    r.clamp(-1.0, 1.0).acos()
}

/// Arcsine with the argument clamped to [-1, 1].
#[inline]
pub fn safe_asin(r: f32) -> f32 {
    r.clamp(-1.0, 1.0).asin()
}

/// True when `|v| < EPSILON`.
#[inline]
pub fn is_zero(v: f32) -> bool {
    v.abs() < EPSILON
}

/// Unit vector in the direction of `v`, or zero for a (near-)zero vector.
#[inline]
pub fn safe_normalize(v: Vec2) -> Vec2 {
    let inv_len = safe_inv_sqrt(1.0, v.length_squared());
    v * inv_len
}

/// Distance between two points via the safe square root.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    safe_sqrt((a - b).length_squared())
}

/// Unsigned angle between two vectors in degrees (0..=180).
///
/// Zero if either vector is degenerate.
pub fn angle_degrees(a: Vec2, b: Vec2) -> f32 {
    let m = safe_sqrt(a.length_squared() * b.length_squared());
    if is_zero(m) {
        return 0.0;
    }
    safe_acos(a.dot(b) / m).to_degrees()
}

/// Matrix inverse via the determinant. Zero matrix when singular.
pub fn safe_inverse(m: Mat2) -> Mat2 {
    let inv_det = safe_inv(m.determinant());
    if inv_det == 0.0 {
        return Mat2::ZERO;
    }
    Mat2::from_cols(
        Vec2::new(m.y_axis.y, -m.x_axis.y) * inv_det,
        Vec2::new(-m.y_axis.x, m.x_axis.x) * inv_det,
    )
}

/// Convenience methods on `Vec2` mirroring the kernel vocabulary.
pub trait Vec2Ext {
    /// Counter clock-wise perpendicular `(-y, x)`.
    fn perp_ccw(self) -> Vec2;
    /// Clock-wise perpendicular `(y, -x)`.
    fn perp_cw(self) -> Vec2;
    /// 2D cross product (z component of the 3D cross product).
    fn cross(self, rhs: Vec2) -> f32;
    /// See [`safe_normalize`].
    fn safe_normalized(self) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn perp_ccw(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    #[inline]
    fn perp_cw(self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }

    #[inline]
    fn cross(self, rhs: Vec2) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    #[inline]
    fn safe_normalized(self) -> Vec2 {
        safe_normalize(self)
    }
}
