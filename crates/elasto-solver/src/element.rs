//! Per-triangle FEM element data.
//!
//! Rest-shape data is computed once from the triangle's initial particle
//! positions and never changes afterwards:
//!
//! - `inv_rest`: inverse of the rest edge matrix `Dm = [x1-x0 | x2-x0]`,
//!   so that `F = Ds · Dm⁻¹` maps rest edges to current edges.
//! - `area_normals`: the three rest edge normals, each scaled by the
//!   length of the edge opposite its vertex. Nodal force `i` is
//!   `-R·P·b_i / 3`.
//!
//! The plastic strain is simulation state and is the only field the
//! engine mutates.

use serde::{Deserialize, Serialize};

use elasto_math::mat2::edge_matrix;
use elasto_math::{Mat2, Mat2Ext, Vec2, Vec2Ext};

/// Rest-shape data plus accumulated plastic strain for one triangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    inv_rest: Mat2,
    area_normals: [Vec2; 3],
    rest_area: f32,
    plastic_strain: Mat2,
}

impl Element {
    /// Builds an element from the triangle's rest positions (CCW).
    ///
    /// A degenerate rest triangle gets a zero `inv_rest`, so it produces
    /// no deformation and no force.
    pub fn new(x: [Vec2; 3]) -> Self {
        let dm = edge_matrix(x[0], x[1], x[2]);
        let inv_rest = dm.safe_inverse();

        let area_normals = [
            (x[2] - x[1]).perp_ccw(),
            (x[2] - x[0]).perp_cw(),
            (x[1] - x[0]).perp_ccw(),
        ];

        Self {
            inv_rest,
            area_normals,
            rest_area: 0.5 * (x[1] - x[0]).cross(x[2] - x[0]),
            plastic_strain: Mat2::ZERO,
        }
    }

    /// Inverse rest edge matrix `Dm⁻¹`.
    #[inline]
    pub fn inv_rest(&self) -> Mat2 {
        self.inv_rest
    }

    /// Rest area-weighted edge normals, one per vertex.
    #[inline]
    pub fn area_normals(&self) -> [Vec2; 3] {
        self.area_normals
    }

    /// Signed rest area.
    #[inline]
    pub fn rest_area(&self) -> f32 {
        self.rest_area
    }

    /// Accumulated plastic strain.
    #[inline]
    pub fn plastic_strain(&self) -> Mat2 {
        self.plastic_strain
    }

    pub(crate) fn plastic_strain_mut(&mut self) -> &mut Mat2 {
        &mut self.plastic_strain
    }

    /// Deformation gradient `F = Ds · Dm⁻¹` for current positions `x`.
    ///
    /// Passing velocities instead of positions gives `Ḟ`.
    #[inline]
    pub fn deformation_gradient(&self, x: [Vec2; 3]) -> Mat2 {
        edge_matrix(x[0], x[1], x[2]) * self.inv_rest
    }
}
