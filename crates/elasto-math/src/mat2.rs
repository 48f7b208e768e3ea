//! 2×2 matrix helpers for the constitutive model.
//!
//! `glam::Mat2` is column-major: `x_axis` is column 0 and `y_axis`
//! column 1, so the element in row `r`, column `c` is `col(c)[r]`.

use glam::{Mat2, Vec2};

use crate::safe::{safe_inverse, safe_sqrt};

/// Extension methods missing from `glam::Mat2`.
pub trait Mat2Ext {
    /// Sum of the diagonal.
    fn trace(&self) -> f32;
    /// `sqrt(Σ m_ij²)`.
    fn frobenius_norm(&self) -> f32;
    /// `(M + Mᵀ) / 2`.
    fn symmetric_part(&self) -> Mat2;
    /// Element at row `r`, column `c`. Panics if either is > 1.
    fn at(&self, r: usize, c: usize) -> f32;
    /// Copy of `self` with column `c` replaced. Panics if `c` > 1.
    fn with_column(&self, c: usize, v: Vec2) -> Mat2;
    /// See [`safe_inverse`].
    fn safe_inverse(&self) -> Mat2;
}

impl Mat2Ext for Mat2 {
    #[inline]
    fn trace(&self) -> f32 {
        self.x_axis.x + self.y_axis.y
    }

    #[inline]
    fn frobenius_norm(&self) -> f32 {
        safe_sqrt(self.x_axis.length_squared() + self.y_axis.length_squared())
    }

    #[inline]
    fn symmetric_part(&self) -> Mat2 {
        (*self + self.transpose()) * 0.5
    }

    #[inline]
    fn at(&self, r: usize, c: usize) -> f32 {
        let col = match c {
            0 => self.x_axis,
            1 => self.y_axis,
            _ => panic!("Mat2 column index out of range: {c}"),
        };
        match r {
            0 => col.x,
            1 => col.y,
            _ => panic!("Mat2 row index out of range: {r}"),
        }
    }

    fn with_column(&self, c: usize, v: Vec2) -> Mat2 {
        match c {
            0 => Mat2::from_cols(v, self.y_axis),
            1 => Mat2::from_cols(self.x_axis, v),
            _ => panic!("Mat2 column index out of range: {c}"),
        }
    }

    #[inline]
    fn safe_inverse(&self) -> Mat2 {
        safe_inverse(*self)
    }
}

/// Matrix whose columns are the two edge vectors of a triangle
/// `[x1 - x0 | x2 - x0]`.
#[inline]
pub fn edge_matrix(x0: Vec2, x1: Vec2, x2: Vec2) -> Mat2 {
    Mat2::from_cols(x1 - x0, x2 - x0)
}
