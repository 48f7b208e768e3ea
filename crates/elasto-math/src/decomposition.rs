//! Matrix decompositions for the corotational constitutive model.
//!
//! Provides the rotation factor of a 2×2 QR decomposition (used to strip
//! the rigid rotation from a deformation gradient) and the eigen
//! decomposition of a symmetric 2×2 matrix (principal stresses).

use glam::{Mat2, Vec2};

use crate::mat2::Mat2Ext;
use crate::safe::{is_zero, safe_normalize, safe_sqrt};

/// Rotation `Q` of the QR decomposition `F = Q·R`.
///
/// The first column of `Q` is the normalized first column of `F` and the
/// second is its counter clock-wise perpendicular, so `Q` is always a
/// proper rotation (det = +1) even for inverted elements.
///
/// A (near-)zero first column yields the identity.
pub fn qr_rotation(f: Mat2) -> Mat2 {
    let a = safe_normalize(f.x_axis);
    if a == Vec2::ZERO {
        return Mat2::IDENTITY;
    }
    Mat2::from_cols(a, Vec2::new(-a.y, a.x))
}

/// Eigenvalues of a 2×2 matrix from its characteristic polynomial
/// `λ² − tr·λ + det = 0`, returned as `(larger, smaller)`.
///
/// Intended for symmetric input, where both roots are real. A negative
/// discriminant (non-symmetric input, or rounding) is clamped to zero.
pub fn symmetric_eigenvalues(m: Mat2) -> (f32, f32) {
    let half_trace = 0.5 * m.trace();
    let det = m.determinant();
    let disc = safe_sqrt(half_trace * half_trace - det);
    (half_trace + disc, half_trace - disc)
}

/// Unit eigenvector of a symmetric 2×2 matrix for `eigenvalue`.
///
/// Uses `(m01, λ − m00)`. When the off-diagonal term vanishes the matrix
/// is diagonal and the matching axis is returned instead.
pub fn symmetric_eigenvector(m: Mat2, eigenvalue: f32) -> Vec2 {
    let m00 = m.at(0, 0);
    let m01 = m.at(0, 1);
    let m11 = m.at(1, 1);

    if is_zero(m01) {
        return if (eigenvalue - m00).abs() <= (eigenvalue - m11).abs() {
            Vec2::X
        } else {
            Vec2::Y
        };
    }

    safe_normalize(Vec2::new(m01, eigenvalue - m00))
}

/// Full symmetric eigen decomposition: eigenvalues (larger first) and the
/// eigenvector belonging to the larger one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenDecomposition {
    /// Larger eigenvalue.
    pub max: f32,
    /// Smaller eigenvalue.
    pub min: f32,
    /// Unit eigenvector for `max`.
    pub max_vector: Vec2,
}

/// Decompose a symmetric 2×2 matrix.
pub fn eigen_decomposition(m: Mat2) -> EigenDecomposition {
    let (max, min) = symmetric_eigenvalues(m);
    EigenDecomposition {
        max,
        min,
        max_vector: symmetric_eigenvector(m, max),
    }
}
