//! Constitutive model trait.
//!
//! The simulation hands each element's deformation gradient, its rate,
//! and the element's plastic strain to a model and gets back the first
//! Piola-style stress used to distribute nodal forces.

use elasto_math::Mat2;

/// Everything a model produces for one element in one substep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressState {
    /// Rigid rotation factored out of `F`.
    pub rotation: Mat2,
    /// Elastic strain after plastic strain is removed.
    pub strain: Mat2,
    /// Elastic stress.
    pub elastic_stress: Mat2,
    /// Viscous stress from the strain rate.
    pub damping_stress: Mat2,
    /// `elastic_stress + damping_stress`, in the rotated frame.
    pub stress: Mat2,
    /// True if the strain exceeded the yield threshold this step.
    pub yielded: bool,
}

/// Trait for constitutive models (material behavior).
pub trait ConstitutiveModel: Send + Sync {
    /// Evaluate stress for one element.
    ///
    /// # Arguments
    /// - `f`: deformation gradient `Ds · Dm⁻¹`
    /// - `f_dot`: its time derivative, `Vs · Dm⁻¹`
    /// - `plastic_strain`: the element's accumulated plastic strain,
    ///   updated in place
    /// - `dt`: substep size
    fn evaluate(&self, f: Mat2, f_dot: Mat2, plastic_strain: &mut Mat2, dt: f32) -> StressState;

    /// Returns the name of this constitutive model.
    fn name(&self) -> &str;
}
