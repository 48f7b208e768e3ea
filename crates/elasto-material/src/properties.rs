//! Elastoplastic material parameters.
//!
//! One flat record per material. The stiffness pair is given directly as
//! Lamé parameters; Young's modulus and Poisson's ratio are derived for
//! reporting only.

use serde::{Deserialize, Serialize};

use elasto_types::constants::DEFAULT_PLASTIC_STRAIN_CAP;
use elasto_types::{ElastoError, ElastoResult};

/// Physical parameters of an isotropic elastoplastic solid.
///
/// | Group | Fields |
/// |---|---|
/// | Elasticity | `lame_lambda`, `lame_mu` |
/// | Plasticity | `yield_strain`, `creep`, `plastic_cap` |
/// | Damping | `damping_lambda`, `damping_mu` |
/// | Failure | `toughness` |
/// | Mass | `density` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialProperties {
    /// Preset name (e.g. "beam").
    pub name: String,

    /// First Lamé parameter λ.
    pub lame_lambda: f32,

    /// Shear modulus μ (second Lamé parameter).
    pub lame_mu: f32,

    /// Frobenius norm of the elastic strain above which plastic strain
    /// starts to accumulate.
    pub yield_strain: f32,

    /// Rate at which over-yield strain flows into plastic strain (1/s).
    pub creep: f32,

    /// Upper bound on the Frobenius norm of the plastic strain.
    pub plastic_cap: f32,

    /// λ-like coefficient applied to the strain rate.
    pub damping_lambda: f32,

    /// μ-like coefficient applied to the strain rate.
    pub damping_mu: f32,

    /// Principal stress above which a fracture event is recorded.
    pub toughness: f32,

    /// Areal density, used when masses are lumped from triangle areas.
    pub density: f32,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            name: "default".into(),
            lame_lambda: 1000.0,
            lame_mu: 1000.0,
            yield_strain: 0.5,
            creep: 25.0,
            plastic_cap: DEFAULT_PLASTIC_STRAIN_CAP,
            damping_lambda: 10.0,
            damping_mu: 10.0,
            toughness: 500.0,
            density: 1.0,
        }
    }
}

impl MaterialProperties {
    /// Sets both damping coefficients to `damping`.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping_lambda = damping;
        self.damping_mu = damping;
        self
    }

    /// Sets both Lamé parameters to `stiffness`.
    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.lame_lambda = stiffness;
        self.lame_mu = stiffness;
        self
    }

    /// Sets the fracture threshold.
    pub fn with_toughness(mut self, toughness: f32) -> Self {
        self.toughness = toughness;
        self
    }

    /// Young's modulus `E = μ(3λ + 2μ) / (λ + μ)`. Zero for a zero-stiffness material.
    pub fn youngs_modulus(&self) -> f32 {
        let denom = self.lame_lambda + self.lame_mu;
        if denom.abs() < 1e-12 {
            return 0.0;
        }
        self.lame_mu * (3.0 * self.lame_lambda + 2.0 * self.lame_mu) / denom
    }

    /// Poisson's ratio `ν = λ / (2(λ + μ))`.
    pub fn poisson_ratio(&self) -> f32 {
        let denom = self.lame_lambda + self.lame_mu;
        if denom.abs() < 1e-12 {
            return 0.0;
        }
        self.lame_lambda / (2.0 * denom)
    }

    /// Checks every parameter is finite and in range.
    pub fn validate(&self) -> ElastoResult<()> {
        let fields = [
            ("lame_lambda", self.lame_lambda),
            ("lame_mu", self.lame_mu),
            ("yield_strain", self.yield_strain),
            ("creep", self.creep),
            ("plastic_cap", self.plastic_cap),
            ("damping_lambda", self.damping_lambda),
            ("damping_mu", self.damping_mu),
            ("toughness", self.toughness),
            ("density", self.density),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ElastoError::InvalidMaterial(format!(
                    "{}: {} must be finite, got {}",
                    self.name, field, value
                )));
            }
            if value < 0.0 {
                return Err(ElastoError::InvalidMaterial(format!(
                    "{}: {} must be non-negative, got {}",
                    self.name, field, value
                )));
            }
        }

        Ok(())
    }
}
