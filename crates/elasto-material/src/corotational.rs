//! Corotational linear elastoplastic model.
//!
//! The rotation of the QR decomposition `F = Q·R` is factored out, and
//! small-strain (Cauchy) elasticity is applied in the rotated frame:
//!
//! ```text
//! e  = sym(Qᵀ F) − I − Ep
//! S  = λ tr(e) I + 2μ e
//! ė  = sym(Qᵀ Ḟ)
//! Ṡ  = λd tr(ė) I + 2μd ė
//! P  = S + Ṡ
//! ```
//!
//! Plastic strain `Ep` creeps toward the total strain while the strain
//! norm is above the yield threshold and is capped in norm.

use elasto_math::decomposition::qr_rotation;
use elasto_math::{Mat2, Mat2Ext};

use crate::properties::MaterialProperties;
use crate::traits::{ConstitutiveModel, StressState};

/// Small (Cauchy) strain of `F` in the frame rotated by `r`.
pub fn cauchy_strain(r: Mat2, f: Mat2) -> Mat2 {
    (r.transpose() * f).symmetric_part() - Mat2::IDENTITY
}

/// Rate of the Cauchy strain for `ḟ`, rotated by `r`.
pub fn cauchy_strain_rate(r: Mat2, f_dot: Mat2) -> Mat2 {
    (r.transpose() * f_dot).symmetric_part()
}

/// Isotropic linear stress `λ tr(e) I + 2μ e`.
pub fn isotropic_stress(strain: Mat2, lambda: f32, mu: f32) -> Mat2 {
    Mat2::IDENTITY * (lambda * strain.trace()) + strain * (2.0 * mu)
}

/// Flows over-yield strain into `plastic` and caps its norm.
///
/// Returns true if `strain` exceeded the yield threshold.
pub fn update_plastic_strain(
    plastic: &mut Mat2,
    strain: Mat2,
    dt: f32,
    props: &MaterialProperties,
) -> bool {
    let yielded = strain.frobenius_norm() > props.yield_strain;
    if yielded {
        *plastic += strain * (dt * props.creep);
    }

    let norm = plastic.frobenius_norm();
    if norm > props.plastic_cap {
        *plastic *= props.plastic_cap / norm;
    }

    yielded
}

/// Corotational model bound to one set of material parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CorotationalModel {
    props: MaterialProperties,
}

impl CorotationalModel {
    /// Creates a model for `props`.
    pub fn new(props: MaterialProperties) -> Self {
        Self { props }
    }

    /// Material parameters in use.
    pub fn properties(&self) -> &MaterialProperties {
        &self.props
    }
}

impl Default for CorotationalModel {
    fn default() -> Self {
        Self::new(MaterialProperties::default())
    }
}

impl ConstitutiveModel for CorotationalModel {
    fn evaluate(&self, f: Mat2, f_dot: Mat2, plastic_strain: &mut Mat2, dt: f32) -> StressState {
        let props = &self.props;
        let rotation = qr_rotation(f);

        let total = cauchy_strain(rotation, f);
        let yielded = update_plastic_strain(plastic_strain, total, dt, props);
        let strain = total - *plastic_strain;
        let elastic_stress = isotropic_stress(strain, props.lame_lambda, props.lame_mu);

        let rate = cauchy_strain_rate(rotation, f_dot);
        let damping_stress = isotropic_stress(rate, props.damping_lambda, props.damping_mu);

        StressState {
            rotation,
            strain,
            elastic_stress,
            damping_stress,
            stress: elastic_stress + damping_stress,
            yielded,
        }
    }

    fn name(&self) -> &str {
        "corotational"
    }
}
